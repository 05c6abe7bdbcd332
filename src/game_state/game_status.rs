//! Game outcome classification.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, PieceKind};

const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

impl GameStatus {
    /// Checkmate and stalemate end the game; rule draws are only reported.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        !matches!(self, GameStatus::Ongoing | GameStatus::Checkmate { .. })
    }
}

/// True when neither side can possibly deliver mate: bare kings, a single
/// minor piece, or bishops that all stand on one square color.
pub fn has_insufficient_material(state: &BoardState) -> bool {
    let mut knights = 0u32;
    let mut bishops = 0u64;
    for color in [Color::White, Color::Black] {
        let heavy = state.bitboard(color, PieceKind::Pawn)
            | state.bitboard(color, PieceKind::Rook)
            | state.bitboard(color, PieceKind::Queen);
        if heavy != 0 {
            return false;
        }
        knights += state.bitboard(color, PieceKind::Knight).count_ones();
        bishops |= state.bitboard(color, PieceKind::Bishop);
    }

    let minors = knights + bishops.count_ones();
    if minors <= 1 {
        return true;
    }

    knights == 0 && (bishops & LIGHT_SQUARES == 0 || bishops & !LIGHT_SQUARES == 0)
}
