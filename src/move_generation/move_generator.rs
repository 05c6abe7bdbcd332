use thiserror::Error;

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::Square;
use crate::moves::chess_move::ChessMove;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("no piece of the side to move on square {0}")]
    EmptyOrigin(Square),
    #[error("invalid board state: {0}")]
    InvalidState(String),
}

/// A legal move together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub chess_move: ChessMove,
    pub board_after: BoardState,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, board: &BoardState) -> MoveGenResult<Vec<GeneratedMove>>;
}
