//! Audible feedback classification for applied and undone moves.

use crate::game_state::board_state::BoardState;
use crate::game_state::game_status::GameStatus;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::chess_move::{ChessMove, MoveFlag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveSound {
    Move,
    Capture,
    Castle,
    Promote,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveFeedback {
    pub sound: MoveSound,
    /// The move ended the game (mate, stalemate or a rule draw).
    pub game_over: bool,
}

impl MoveFeedback {
    /// Check outranks promotion, which outranks capture and castling.
    pub fn classify(
        before: &BoardState,
        mv: ChessMove,
        after: &BoardState,
        status: GameStatus,
    ) -> Self {
        let is_capture = mv.flag == MoveFlag::EnPassantCapture || !before.is_empty(mv.to);

        let sound = if is_king_in_check(after, after.side_to_move) {
            MoveSound::Check
        } else if mv.is_promotion() {
            MoveSound::Promote
        } else if is_capture {
            MoveSound::Capture
        } else if mv.is_castle() {
            MoveSound::Castle
        } else {
            MoveSound::Move
        };

        Self {
            sound,
            game_over: status != GameStatus::Ongoing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::move_generation::legal_move_apply::apply_move;

    fn feedback(fen: &str, mv: ChessMove, status: GameStatus) -> MoveFeedback {
        let before = BoardState::from_fen(fen).expect("test FEN should parse");
        let after = apply_move(&before, mv).expect("move should apply");
        MoveFeedback::classify(&before, mv, &after, status)
    }

    #[test]
    fn quiet_capture_and_castle() {
        let quiet = feedback(
            "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1",
            ChessMove::new(0, 1),
            GameStatus::Ongoing,
        );
        assert_eq!(quiet.sound, MoveSound::Move);
        assert!(!quiet.game_over);

        let castle = feedback(
            "4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1",
            ChessMove::new(4, 6).with_flag(MoveFlag::KingSideCastle),
            GameStatus::Ongoing,
        );
        assert_eq!(castle.sound, MoveSound::Castle);

        let capture = feedback(
            "4k3/8/8/3p4/8/8/8/3RK3 w - - 0 1",
            ChessMove::new(3, 35),
            GameStatus::Ongoing,
        );
        assert_eq!(capture.sound, MoveSound::Capture);
    }

    #[test]
    fn promotion_capture_sounds_as_promotion_and_check_wins() {
        let promote = feedback(
            "3r4/4P3/8/8/8/8/k7/4K3 w - - 0 1",
            ChessMove::new(52, 59).with_promotion(PieceKind::Knight),
            GameStatus::Ongoing,
        );
        assert_eq!(promote.sound, MoveSound::Promote);

        let mate = feedback(
            "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
            ChessMove::new(59, 31),
            GameStatus::Checkmate { winner: Color::Black },
        );
        assert_eq!(mate.sound, MoveSound::Check);
        assert!(mate.game_over);
    }
}
