//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, applies candidate moves,
//! and filters out those that leave the mover's own king attacked.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::chess_types::Square;
use crate::game_state::game_status::{has_insufficient_material, GameStatus};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::generate_slider_moves;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::chess_move::ChessMove;

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, board: &BoardState) -> MoveGenResult<Vec<GeneratedMove>> {
        let pseudo = generate_pseudo_legal_moves(board);

        let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
        for mv in pseudo {
            let next = apply_move(board, mv)?;

            // Illegal if own king is in check after move.
            if is_king_in_check(&next, board.side_to_move) {
                continue;
            }

            legal.push(GeneratedMove {
                chess_move: mv,
                board_after: next,
            });
        }

        Ok(legal)
    }
}

/// Moves that obey piece movement rules but may expose the own king.
pub fn generate_pseudo_legal_moves(board: &BoardState) -> Vec<ChessMove> {
    let mut pseudo = Vec::<ChessMove>::with_capacity(128);

    generate_pawn_moves(board, &mut pseudo);
    generate_knight_moves(board, &mut pseudo);
    generate_slider_moves(board, &mut pseudo);
    generate_king_moves(board, &mut pseudo);

    pseudo
}

pub fn generate_legal_moves(board: &BoardState) -> MoveGenResult<Vec<ChessMove>> {
    Ok(LegalMoveGenerator
        .generate_legal_moves(board)?
        .into_iter()
        .map(|generated| generated.chess_move)
        .collect())
}

/// Legal moves starting on `from`. Empty when the square holds no piece of
/// the side to move.
pub fn legal_moves_from(board: &BoardState, from: Square) -> MoveGenResult<Vec<ChessMove>> {
    if board.kind_for_color(board.side_to_move, from).is_none() {
        return Ok(Vec::new());
    }
    Ok(generate_legal_moves(board)?
        .into_iter()
        .filter(|mv| mv.from == from)
        .collect())
}

#[inline]
pub fn is_in_check(board: &BoardState) -> bool {
    is_king_in_check(board, board.side_to_move)
}

pub fn is_checkmate(board: &BoardState) -> MoveGenResult<bool> {
    Ok(is_in_check(board) && generate_legal_moves(board)?.is_empty())
}

pub fn is_stalemate(board: &BoardState) -> MoveGenResult<bool> {
    Ok(!is_in_check(board) && generate_legal_moves(board)?.is_empty())
}

/// Status derivable from a single position. Repetition needs the game
/// history and is decided by the controller.
pub fn positional_status(board: &BoardState) -> MoveGenResult<GameStatus> {
    if generate_legal_moves(board)?.is_empty() {
        return Ok(if is_in_check(board) {
            GameStatus::Checkmate {
                winner: board.side_to_move.opposite(),
            }
        } else {
            GameStatus::Stalemate
        });
    }
    if board.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
        return Ok(GameStatus::FiftyMoveRule);
    }
    if has_insufficient_material(board) {
        return Ok(GameStatus::InsufficientMaterial);
    }
    Ok(GameStatus::Ongoing)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::move_generation::legal_move_checks::is_square_attacked;

    fn board(fen: &str) -> BoardState {
        BoardState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn twenty_moves_from_start() {
        let moves = generate_legal_moves(&BoardState::new_game()).expect("movegen should succeed");
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // Bishop e2 is pinned by the rook on e8 against the king on e1.
        let game = board("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(legal_moves_from(&game, 12).expect("movegen").is_empty());

        // A pinned rook may still slide along the pin.
        let game = board("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let mut targets: Vec<Square> = legal_moves_from(&game, 12)
            .expect("movegen")
            .iter()
            .map(|mv| mv.to)
            .collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![20, 28, 36, 44, 52, 60]);
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let game = board("4k3/8/3N4/8/8/8/8/K3R2r b - - 0 1");
        let moves = generate_legal_moves(&game).expect("movegen should succeed");
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.from == 60));
    }

    #[test]
    fn empty_or_enemy_square_has_no_moves() {
        let game = BoardState::new_game();
        assert!(legal_moves_from(&game, 28).expect("movegen").is_empty());
        assert!(legal_moves_from(&game, 52).expect("movegen").is_empty());
        assert_eq!(legal_moves_from(&game, 6).expect("movegen").len(), 2);
    }

    #[test]
    fn detects_mate_and_stalemate() {
        let fools_mate = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_checkmate(&fools_mate).expect("movegen"));
        assert_eq!(
            positional_status(&fools_mate).expect("movegen"),
            GameStatus::Checkmate { winner: Color::Black }
        );

        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(is_stalemate(&stalemate).expect("movegen"));
        assert!(!is_checkmate(&stalemate).expect("movegen"));
        assert_eq!(positional_status(&stalemate).expect("movegen"), GameStatus::Stalemate);
    }

    #[test]
    fn rule_draws_are_reported() {
        let fifty = board("4k3/8/8/8/8/8/4P3/4K3 w - - 100 80");
        assert_eq!(positional_status(&fifty).expect("movegen"), GameStatus::FiftyMoveRule);

        let bare = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            positional_status(&bare).expect("movegen"),
            GameStatus::InsufficientMaterial
        );
    }

    #[test]
    fn en_passant_offered_only_right_after_double_push() {
        let game = board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3");
        assert!(legal_moves_from(&game, 36)
            .expect("movegen")
            .iter()
            .any(|mv| mv.to == 43));

        let stale = board("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 3");
        assert!(!legal_moves_from(&stale, 36)
            .expect("movegen")
            .iter()
            .any(|mv| mv.to == 43));
    }

    #[test]
    fn random_playouts_never_leave_a_king_attacked() {
        let mut rng = StdRng::seed_from_u64(0x5eed_b0a2d);
        for _game in 0..20 {
            let mut game = BoardState::new_game();
            for _ply in 0..120 {
                let generated = LegalMoveGenerator
                    .generate_legal_moves(&game)
                    .expect("movegen should succeed");
                if generated.is_empty() {
                    assert!(is_checkmate(&game).expect("movegen") || is_stalemate(&game).expect("movegen"));
                    break;
                }
                let pick = rng.random_range(0..generated.len());
                let next = generated[pick].board_after.clone();

                let mover = game.side_to_move;
                let king = next.king_square(mover).expect("king stays on board");
                assert!(!is_square_attacked(&next, king, mover.opposite()));
                assert_eq!(next.side_to_move, mover.opposite());
                assert_eq!(next.bitboard(Color::White, PieceKind::King).count_ones(), 1);
                assert_eq!(next.bitboard(Color::Black, PieceKind::King).count_ones(), 1);
                assert_eq!(
                    BoardState::from_fen(&next.get_fen()).expect("own FEN should parse"),
                    next
                );

                game = next;
            }
        }
    }
}
