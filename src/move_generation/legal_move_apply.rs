//! Move application.
//!
//! Produces the successor `BoardState` for a move generated from `board`.
//! The input is never mutated, so callers can keep it as the undo target.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_moves_king::{castling_lane, CASTLING_LANES};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::chess_move::{ChessMove, MoveFlag};

pub fn apply_move(board: &BoardState, mv: ChessMove) -> MoveGenResult<BoardState> {
    let moving_color = board.side_to_move;
    let enemy_color = moving_color.opposite();
    let from_mask = square_bit(mv.from);
    let to_mask = square_bit(mv.to);

    let moved_piece = board
        .kind_for_color(moving_color, mv.from)
        .ok_or(MoveGenerationError::EmptyOrigin(mv.from))?;

    let mut next = board.clone();

    next.pieces[moving_color.index()][moved_piece.index()] &= !from_mask;

    let is_capture = if mv.flag == MoveFlag::EnPassantCapture {
        let capture_sq = try_square(
            file_of(mv.to) as i8,
            rank_of(mv.to) as i8 - moving_color.forward(),
        )
        .ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("en-passant capture onto {}", mv.to))
        })?;
        next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !square_bit(capture_sq);
        true
    } else if board.occupancy_by_color[enemy_color.index()] & to_mask != 0 {
        for board_of_kind in next.pieces[enemy_color.index()].iter_mut() {
            *board_of_kind &= !to_mask;
        }
        true
    } else {
        false
    };

    let placed = mv.promotion.unwrap_or(moved_piece);
    next.pieces[moving_color.index()][placed.index()] |= to_mask;

    if mv.is_castle() {
        let lane = castling_lane(moving_color, mv.flag).ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("no castling lane for {mv}"))
        })?;
        let rooks = &mut next.pieces[moving_color.index()][PieceKind::Rook.index()];
        *rooks &= !square_bit(lane.rook_from);
        *rooks |= square_bit(lane.rook_to);
    }

    update_castling_rights(&mut next, moving_color, moved_piece, mv);

    next.en_passant_square = if mv.flag == MoveFlag::DoublePawnPush {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    if moved_piece == PieceKind::Pawn || is_capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next.recalc_occupancy();

    Ok(next)
}

fn update_castling_rights(
    board: &mut BoardState,
    moving_color: Color,
    moved_piece: PieceKind,
    mv: ChessMove,
) {
    for lane in CASTLING_LANES.iter() {
        let king_moved = moved_piece == PieceKind::King && lane.color == moving_color;
        // A rook leaving its home square, or anything landing on it.
        let rook_square_touched = mv.from == lane.rook_from || mv.to == lane.rook_from;
        if king_moved || rook_square_touched {
            board.castling_rights &= !lane.right;
        }
    }
}
