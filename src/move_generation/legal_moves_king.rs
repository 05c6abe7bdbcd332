//! King steps and castling.
//!
//! Castling is described by one `CastlingLane` per right so generation, move
//! application and rights bookkeeping read the same squares.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::attack_tables::king_attacks;
use crate::moves::chess_move::{ChessMove, MoveFlag};

#[derive(Debug, Clone, Copy)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub color: Color,
    pub flag: MoveFlag,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook.
    pub must_be_empty: u64,
    /// Squares the king crosses or lands on; none may be attacked.
    pub king_path: [Square; 2],
}

pub const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        right: CASTLE_WHITE_KINGSIDE,
        color: Color::White,
        flag: MoveFlag::KingSideCastle,
        king_from: 4,
        king_to: 6,
        rook_from: 7,
        rook_to: 5,
        must_be_empty: (1 << 5) | (1 << 6),
        king_path: [5, 6],
    },
    CastlingLane {
        right: CASTLE_WHITE_QUEENSIDE,
        color: Color::White,
        flag: MoveFlag::QueenSideCastle,
        king_from: 4,
        king_to: 2,
        rook_from: 0,
        rook_to: 3,
        must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
        king_path: [3, 2],
    },
    CastlingLane {
        right: CASTLE_BLACK_KINGSIDE,
        color: Color::Black,
        flag: MoveFlag::KingSideCastle,
        king_from: 60,
        king_to: 62,
        rook_from: 63,
        rook_to: 61,
        must_be_empty: (1 << 61) | (1 << 62),
        king_path: [61, 62],
    },
    CastlingLane {
        right: CASTLE_BLACK_QUEENSIDE,
        color: Color::Black,
        flag: MoveFlag::QueenSideCastle,
        king_from: 60,
        king_to: 58,
        rook_from: 56,
        rook_to: 59,
        must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
        king_path: [59, 58],
    },
];

pub fn castling_lane(color: Color, flag: MoveFlag) -> Option<&'static CastlingLane> {
    CASTLING_LANES
        .iter()
        .find(|lane| lane.color == color && lane.flag == flag)
}

pub fn generate_king_moves(board: &BoardState, out: &mut Vec<ChessMove>) {
    let Some(from) = board.king_square(board.side_to_move) else {
        return;
    };

    push_targets(board, from, king_attacks(from), out);
    generate_castling_moves(board, from, out);
}

fn generate_castling_moves(board: &BoardState, king_from: Square, out: &mut Vec<ChessMove>) {
    let side = board.side_to_move;
    let enemy = side.opposite();

    // Cannot castle out of check.
    if is_square_attacked(board, king_from, enemy) {
        return;
    }

    for lane in CASTLING_LANES.iter().filter(|lane| lane.color == side) {
        if board.castling_rights & lane.right == 0
            || lane.king_from != king_from
            || board.bitboard(side, PieceKind::Rook) & square_bit(lane.rook_from) == 0
            || board.occupancy_all & lane.must_be_empty != 0
        {
            continue;
        }

        if lane
            .king_path
            .iter()
            .any(|&square| is_square_attacked(board, square, enemy))
        {
            continue;
        }

        out.push(ChessMove::new(lane.king_from, lane.king_to).with_flag(lane.flag));
    }
}
