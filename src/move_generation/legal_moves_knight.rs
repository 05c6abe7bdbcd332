use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::PieceKind;
use crate::move_generation::legal_move_shared::{push_targets, squares_of};
use crate::moves::attack_tables::knight_attacks;
use crate::moves::chess_move::ChessMove;

pub fn generate_knight_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    for from in squares_of(board.bitboard(board.side_to_move, PieceKind::Knight)) {
        push_targets(board, from, knight_attacks(from), out);
    }
}
