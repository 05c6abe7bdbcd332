//! Pseudo-legal bishop, rook and queen moves.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::PieceKind;
use crate::move_generation::legal_move_shared::{push_targets, squares_of};
use crate::moves::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::chess_move::ChessMove;

pub fn generate_slider_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    let side = board.side_to_move;
    let occupancy = board.occupancy_all;

    for from in squares_of(board.bitboard(side, PieceKind::Bishop)) {
        push_targets(board, from, bishop_attacks(from, occupancy), out);
    }
    for from in squares_of(board.bitboard(side, PieceKind::Rook)) {
        push_targets(board, from, rook_attacks(from, occupancy), out);
    }
    for from in squares_of(board.bitboard(side, PieceKind::Queen)) {
        push_targets(board, from, queen_attacks(from, occupancy), out);
    }
}

#[cfg(test)]
mod tests {
    use super::generate_slider_moves;
    use crate::game_state::board_state::BoardState;

    #[test]
    fn sliders_are_boxed_in_at_start() {
        let mut out = Vec::new();
        generate_slider_moves(&BoardState::new_game(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn rook_captures_first_enemy_and_stops() {
        // Rook a1, black knight a4, own pawn b1 blocks the rank.
        let board = BoardState::from_fen("4k3/8/8/8/n7/8/8/RP2K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_slider_moves(&board, &mut out);
        let mut targets: Vec<u8> = out.iter().map(|mv| mv.to).collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![8, 16, 24]);
    }
}
