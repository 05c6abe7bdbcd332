//! Game history owner.
//!
//! `GameController` is the single source of truth for the position. It keeps
//! the record of played plies (the undo stack), a redo stack of undone plies,
//! and the pending-promotion sub-state entered when a (from, to) pair is
//! shared by several promotion moves.

use thiserror::Error;
use tracing::{debug, info};

use crate::game_controller::move_feedback::MoveFeedback;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::{PROMOTION_PIECE_KINDS, REPETITION_COUNT};
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_status::GameStatus;
use crate::move_generation::legal_move_generator::{
    generate_pseudo_legal_moves, positional_status, LegalMoveGenerator,
};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerationError, MoveGenerator};
use crate::moves::chess_move::ChessMove;
use crate::utils::san::move_to_san;

pub type ControllerResult<T> = Result<T, ControllerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// No piece of the side to move can travel from `from` to `to`.
    NoSuchMove,
    /// The move is geometrically possible but exposes the own king.
    LeavesKingInCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("illegal move {from}->{to} ({reason:?})")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: IllegalReason,
    },
    #[error("no moves to undo")]
    EmptyHistory,
    #[error("no undone moves to redo")]
    NothingToRedo,
    #[error("no promotion is pending")]
    NoPendingPromotion,
    #[error("a promotion choice is pending")]
    PromotionPending,
    #[error("{0:?} is not an offered promotion piece")]
    InvalidPromotionChoice(PieceKind),
    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
}

/// One played ply.
#[derive(Debug, Clone)]
pub struct GameRecordEntry {
    pub chess_move: ChessMove,
    pub board_after: BoardState,
    pub san: String,
    pub feedback: MoveFeedback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub candidates: Vec<PieceKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub chess_move: ChessMove,
    pub san: String,
    pub feedback: MoveFeedback,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Applied(AppliedMove),
    /// Several promotion moves share the pair; the board is unchanged until
    /// `resolve_promotion` or `cancel_promotion`.
    PromotionPending(Vec<PieceKind>),
}

#[derive(Debug, Clone)]
pub struct GameController {
    initial_state: BoardState,
    record: Vec<GameRecordEntry>,
    redo_stack: Vec<GameRecordEntry>,
    pending_promotion: Option<PendingPromotion>,
    auto_promotion: bool,
    default_promotion: PieceKind,
    // Legal moves of the current position.
    legal_moves: Vec<GeneratedMove>,
}

impl GameController {
    pub fn new() -> ControllerResult<Self> {
        Self::from_position(BoardState::new_game())
    }

    /// Starts a game from an arbitrary position, which becomes the target of
    /// `undo_all`.
    pub fn from_position(initial_state: BoardState) -> ControllerResult<Self> {
        let legal_moves = LegalMoveGenerator.generate_legal_moves(&initial_state)?;
        Ok(Self {
            initial_state,
            record: Vec::new(),
            redo_stack: Vec::new(),
            pending_promotion: None,
            auto_promotion: false,
            default_promotion: PieceKind::Queen,
            legal_moves,
        })
    }

    pub fn board(&self) -> &BoardState {
        self.record
            .last()
            .map(|entry| &entry.board_after)
            .unwrap_or(&self.initial_state)
    }

    pub fn initial_state(&self) -> &BoardState {
        &self.initial_state
    }

    pub fn record(&self) -> &[GameRecordEntry] {
        &self.record
    }

    pub fn ply_count(&self) -> usize {
        self.record.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.record.last().map(|entry| entry.chess_move)
    }

    pub fn pending_promotion(&self) -> Option<&PendingPromotion> {
        self.pending_promotion.as_ref()
    }

    pub fn auto_promotion_override(&mut self, enabled: bool) {
        self.auto_promotion = enabled;
    }

    pub fn auto_promotion(&self) -> bool {
        self.auto_promotion
    }

    /// Only queen, rook, bishop and knight are accepted.
    pub fn set_default_promotion(&mut self, piece: PieceKind) -> ControllerResult<()> {
        if !piece.is_promotion_target() {
            return Err(ControllerError::InvalidPromotionChoice(piece));
        }
        self.default_promotion = piece;
        Ok(())
    }

    pub fn default_promotion(&self) -> PieceKind {
        self.default_promotion
    }

    pub fn legal_moves(&self) -> impl Iterator<Item = ChessMove> + '_ {
        self.legal_moves.iter().map(|generated| generated.chess_move)
    }

    /// Distinct destinations reachable from `from`; promotion variants
    /// collapse to one square.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        let mut destinations: Vec<Square> = self
            .legal_moves()
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to)
            .collect();
        destinations.sort_unstable();
        destinations.dedup();
        destinations
    }

    pub fn can_move_from(&self, from: Square) -> bool {
        self.legal_moves().any(|mv| mv.from == from)
    }

    pub fn is_legal_destination(&self, from: Square, to: Square) -> bool {
        self.legal_moves().any(|mv| mv.connects(from, to))
    }

    pub fn status(&self) -> ControllerResult<GameStatus> {
        self.status_with(None)
    }

    /// Status of the current position, or of `next` as if it had just been
    /// appended to the record.
    fn status_with(&self, next: Option<&BoardState>) -> ControllerResult<GameStatus> {
        let position = next.unwrap_or_else(|| self.board());
        let status = positional_status(position)?;
        if status.is_terminal() {
            return Ok(status);
        }

        let key = position.position_key();
        let repetitions = std::iter::once(&self.initial_state)
            .chain(self.record.iter().map(|entry| &entry.board_after))
            .chain(next)
            .filter(|board| board.position_key() == key)
            .count();
        if repetitions >= REPETITION_COUNT {
            return Ok(GameStatus::ThreefoldRepetition);
        }
        Ok(status)
    }

    pub fn attempt_move(&mut self, from: Square, to: Square) -> ControllerResult<AttemptOutcome> {
        if self.pending_promotion.is_some() {
            return Err(ControllerError::PromotionPending);
        }

        let candidates: Vec<GeneratedMove> = self
            .legal_moves
            .iter()
            .filter(|generated| generated.chess_move.connects(from, to))
            .cloned()
            .collect();

        match candidates.len() {
            0 => {
                let reason = if generate_pseudo_legal_moves(self.board())
                    .iter()
                    .any(|mv| mv.connects(from, to))
                {
                    IllegalReason::LeavesKingInCheck
                } else {
                    IllegalReason::NoSuchMove
                };
                debug!(from, to, ?reason, "rejected move");
                Err(ControllerError::IllegalMove { from, to, reason })
            }
            1 => Ok(AttemptOutcome::Applied(self.apply_generated(&candidates[0])?)),
            _ => {
                if self.auto_promotion {
                    let chosen = candidates
                        .iter()
                        .find(|generated| generated.chess_move.promotion == Some(self.default_promotion))
                        .ok_or(ControllerError::InvalidPromotionChoice(self.default_promotion))?;
                    debug!(from, to, piece = ?self.default_promotion, "auto promotion");
                    return Ok(AttemptOutcome::Applied(self.apply_generated(chosen)?));
                }

                let offered: Vec<PieceKind> = PROMOTION_PIECE_KINDS
                    .iter()
                    .copied()
                    .filter(|kind| {
                        candidates
                            .iter()
                            .any(|generated| generated.chess_move.promotion == Some(*kind))
                    })
                    .collect();
                info!(from, to, "promotion pending");
                self.pending_promotion = Some(PendingPromotion {
                    from,
                    to,
                    candidates: offered.clone(),
                });
                Ok(AttemptOutcome::PromotionPending(offered))
            }
        }
    }

    pub fn resolve_promotion(&mut self, piece: PieceKind) -> ControllerResult<AppliedMove> {
        let pending = self
            .pending_promotion
            .as_ref()
            .ok_or(ControllerError::NoPendingPromotion)?;
        if !pending.candidates.contains(&piece) {
            return Err(ControllerError::InvalidPromotionChoice(piece));
        }

        let (from, to) = (pending.from, pending.to);
        let generated = self
            .legal_moves
            .iter()
            .find(|generated| {
                generated.chess_move.connects(from, to) && generated.chess_move.promotion == Some(piece)
            })
            .cloned()
            .ok_or(ControllerError::InvalidPromotionChoice(piece))?;

        self.pending_promotion = None;
        info!(from, to, ?piece, "promotion resolved");
        self.apply_generated(&generated)
    }

    pub fn cancel_promotion(&mut self) -> ControllerResult<()> {
        let pending = self
            .pending_promotion
            .take()
            .ok_or(ControllerError::NoPendingPromotion)?;
        info!(from = pending.from, to = pending.to, "promotion cancelled");
        Ok(())
    }

    fn apply_generated(&mut self, generated: &GeneratedMove) -> ControllerResult<AppliedMove> {
        let mv = generated.chess_move;
        let before = self.board();
        let san = move_to_san(before, mv)?;
        let status = self.status_with(Some(&generated.board_after))?;
        let feedback = MoveFeedback::classify(before, mv, &generated.board_after, status);
        let next_legal = LegalMoveGenerator.generate_legal_moves(&generated.board_after)?;

        match self.redo_stack.last() {
            Some(entry) if entry.chess_move == mv => {
                self.redo_stack.pop();
            }
            Some(_) => self.redo_stack.clear(),
            None => {}
        }

        self.record.push(GameRecordEntry {
            chess_move: mv,
            board_after: generated.board_after.clone(),
            san: san.clone(),
            feedback,
        });
        self.legal_moves = next_legal;

        info!(mv = %mv, san = %san, ?status, "move applied");
        if status != GameStatus::Ongoing {
            info!(?status, "game over");
        }

        Ok(AppliedMove {
            chess_move: mv,
            san,
            feedback,
            status,
        })
    }

    /// Takes back the last ply. A pending promotion is discarded first.
    pub fn undo(&mut self) -> ControllerResult<GameRecordEntry> {
        if self.record.is_empty() {
            debug!("undo with empty history");
            return Err(ControllerError::EmptyHistory);
        }
        self.pending_promotion = None;

        let entry = self.record.pop().ok_or(ControllerError::EmptyHistory)?;
        self.legal_moves = LegalMoveGenerator.generate_legal_moves(self.board())?;
        self.redo_stack.push(entry.clone());
        info!(mv = %entry.chess_move, "undo");
        Ok(entry)
    }

    pub fn redo(&mut self) -> ControllerResult<AppliedMove> {
        if self.pending_promotion.is_some() {
            return Err(ControllerError::PromotionPending);
        }
        let entry = self.redo_stack.last().cloned().ok_or(ControllerError::NothingToRedo)?;
        let generated = self
            .legal_moves
            .iter()
            .find(|generated| generated.chess_move == entry.chess_move)
            .cloned()
            .ok_or_else(|| {
                MoveGenerationError::InvalidState(format!("redo move {} is not legal", entry.chess_move))
            })?;
        info!(mv = %entry.chess_move, "redo");
        self.apply_generated(&generated)
    }

    /// Undoes every ply, returning how many were taken back.
    pub fn undo_all(&mut self) -> ControllerResult<usize> {
        if self.record.is_empty() {
            return Err(ControllerError::EmptyHistory);
        }
        let mut count = 0;
        while !self.record.is_empty() {
            self.undo()?;
            count += 1;
        }
        Ok(count)
    }

    /// Redoes every undone ply, returning how many were replayed.
    pub fn redo_all(&mut self) -> ControllerResult<usize> {
        if self.redo_stack.is_empty() {
            return Err(ControllerError::NothingToRedo);
        }
        let mut count = 0;
        while !self.redo_stack.is_empty() {
            self.redo()?;
            count += 1;
        }
        Ok(count)
    }

    /// Resets to the standard start position, keeping promotion settings.
    pub fn new_game(&mut self) -> ControllerResult<()> {
        self.set_position(BoardState::new_game())
    }

    pub fn set_position(&mut self, initial_state: BoardState) -> ControllerResult<()> {
        self.legal_moves = LegalMoveGenerator.generate_legal_moves(&initial_state)?;
        self.initial_state = initial_state;
        self.record.clear();
        self.redo_stack.clear();
        self.pending_promotion = None;
        info!(fen = %self.initial_state.get_fen(), "new game");
        Ok(())
    }

    /// Numbered SAN text, e.g. `1. e4 e5 2. Nf3`.
    pub fn move_list(&self) -> String {
        let mut parts = Vec::<String>::with_capacity(self.record.len() + self.record.len() / 2);
        let mut move_number = self.initial_state.fullmove_number;
        let mut white_to_move = self.initial_state.side_to_move == Color::White;

        for (ply, entry) in self.record.iter().enumerate() {
            if white_to_move {
                parts.push(format!("{move_number}."));
            } else if ply == 0 {
                parts.push(format!("{move_number}..."));
            }
            parts.push(entry.san.clone());
            if !white_to_move {
                move_number += 1;
            }
            white_to_move = !white_to_move;
        }

        parts.join(" ")
    }
}
