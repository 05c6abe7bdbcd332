//! Pseudo-legal pawn moves: pushes, double pushes, captures, en passant and
//! promotions (one move per promotion piece).

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::PROMOTION_PIECE_KINDS;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::squares_of;
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::chess_move::{ChessMove, MoveFlag};

pub fn generate_pawn_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    let side = board.side_to_move;
    let enemy_occ = board.occupancy_by_color[side.opposite().index()];
    let start_rank = match side {
        Color::White => 1,
        Color::Black => 6,
    };

    for from in squares_of(board.bitboard(side, PieceKind::Pawn)) {
        let file = file_of(from) as i8;
        let rank = rank_of(from) as i8;

        if let Some(one_step) = try_square(file, rank + side.forward()) {
            if board.is_empty(one_step) {
                push_pawn_move(side, ChessMove::new(from, one_step), out);

                if rank_of(from) == start_rank {
                    if let Some(two_step) = try_square(file, rank + 2 * side.forward()) {
                        if board.is_empty(two_step) {
                            out.push(
                                ChessMove::new(from, two_step).with_flag(MoveFlag::DoublePawnPush),
                            );
                        }
                    }
                }
            }
        }

        let attacks = pawn_attacks(side, from);
        for to in squares_of(attacks & enemy_occ) {
            push_pawn_move(side, ChessMove::new(from, to), out);
        }

        if let Some(ep) = board.en_passant_square {
            if attacks & square_bit(ep) != 0 && board.is_empty(ep) {
                out.push(ChessMove::new(from, ep).with_flag(MoveFlag::EnPassantCapture));
            }
        }
    }
}

fn push_pawn_move(side: Color, mv: ChessMove, out: &mut Vec<ChessMove>) {
    if rank_of(mv.to) == side.promotion_rank() {
        for piece in PROMOTION_PIECE_KINDS {
            out.push(mv.with_promotion(piece));
        }
    } else {
        out.push(mv);
    }
}
