use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::ChessMove;

/// Emits one normal move per set bit of `targets`, skipping own-occupied
/// squares.
#[inline]
pub fn push_targets(board: &BoardState, from: Square, targets: u64, out: &mut Vec<ChessMove>) {
    let own_occ = board.occupancy_by_color[board.side_to_move.index()];
    let mut remaining = targets & !own_occ;
    while remaining != 0 {
        let to = remaining.trailing_zeros() as Square;
        out.push(ChessMove::new(from, to));
        remaining &= remaining - 1;
    }
}

/// Iterates the squares of a bitboard from a1 upward.
#[inline]
pub fn squares_of(mut bitboard: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bitboard == 0 {
            return None;
        }
        let square = bitboard.trailing_zeros() as Square;
        bitboard &= bitboard - 1;
        Some(square)
    })
}
