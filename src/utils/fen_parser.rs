//! FEN-to-BoardState parser.
//!
//! Builds a fully-populated board from a Forsyth-Edwards Notation string,
//! including piece bitboards, rights, clocks, and occupancies. Positions
//! without exactly one king per color are rejected, as are positions where
//! the side that just moved is still in check. An en-passant target must sit
//! behind a pawn that could have just made a double push.

use thiserror::Error;

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::utils::algebraic::{algebraic_to_square, AlgebraicError};

pub type FenResult<T> = Result<T, FenError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),
    #[error("FEN has extra trailing fields")]
    TrailingFields,
    #[error("board layout must contain 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not sum to 8 files")]
    RankWidth { rank: u8 },
    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),
    #[error("invalid side-to-move field: {0}")]
    InvalidSideToMove(String),
    #[error("invalid castling rights character: {0}")]
    InvalidCastling(char),
    #[error("invalid en-passant square: {0}")]
    InvalidEnPassant(#[from] AlgebraicError),
    #[error("invalid {field}: {value}")]
    InvalidCounter { field: &'static str, value: String },
    #[error("{color:?} must have exactly one king, found {count}")]
    KingCount { color: Color, count: u32 },
    #[error("{0:?} is not to move but its king is in check")]
    OpponentInCheck(Color),
    #[error("no pawn could have just double-pushed past en-passant square {0}")]
    ImpossibleEnPassant(String),
}

pub fn parse_fen(fen: &str) -> FenResult<BoardState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;
    // Clocks are commonly omitted in hand-written positions.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut board = BoardState::new_empty();

    parse_board(board_part, &mut board)?;
    board.side_to_move = parse_side_to_move(side_part)?;
    board.castling_rights = parse_castling_rights(castling_part)?;
    board.en_passant_square = parse_en_passant_square(en_passant_part)?;
    board.halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    board.fullmove_number = parse_counter("fullmove number", fullmove_part)?;

    board.recalc_occupancy();

    for color in [Color::White, Color::Black] {
        let count = board.bitboard(color, PieceKind::King).count_ones();
        if count != 1 {
            return Err(FenError::KingCount { color, count });
        }
    }

    let waiting = board.side_to_move.opposite();
    if is_king_in_check(&board, waiting) {
        return Err(FenError::OpponentInCheck(waiting));
    }

    if let Some(target) = board.en_passant_square {
        if !en_passant_target_is_plausible(&board, target) {
            return Err(FenError::ImpossibleEnPassant(en_passant_part.to_owned()));
        }
    }

    Ok(board)
}

fn parse_board(board_part: &str, board: &mut BoardState) -> FenResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidPiece(ch));
                }
                file += empty_count as u8;
                continue;
            }

            let kind = PieceKind::from_letter(ch).ok_or(FenError::InvalidPiece(ch))?;
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };

            if file >= 8 {
                return Err(FenError::RankWidth { rank: board_rank + 1 });
            }

            board.pieces[color.index()][kind.index()] |= square_bit(make_square(file, board_rank));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::RankWidth { rank: board_rank + 1 });
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> FenResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> FenResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(FenError::InvalidCastling(ch)),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> FenResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Ok(Some(algebraic_to_square(en_passant_part)?))
}

/// The target is the square a pawn of the waiting side skipped over: rank 6
/// with a black pawn on rank 5 when White moves, rank 3 with a white pawn on
/// rank 4 when Black moves. Both the target and the pawn's start square are
/// empty.
fn en_passant_target_is_plausible(board: &BoardState, target: Square) -> bool {
    let (target_rank, pushed_rank, start_rank) = match board.side_to_move {
        Color::White => (5, 4, 6),
        Color::Black => (2, 3, 1),
    };
    if rank_of(target) != target_rank {
        return false;
    }

    let file = file_of(target);
    let pushed_pawn = Piece {
        kind: PieceKind::Pawn,
        color: board.side_to_move.opposite(),
    };
    board.piece_at(target).is_none()
        && board.piece_at(make_square(file, start_rank)).is_none()
        && board.piece_at(make_square(file, pushed_rank)) == Some(pushed_pawn)
}

fn parse_counter(field: &'static str, value: &str) -> FenResult<u16> {
    value.parse::<u16>().map_err(|_| FenError::InvalidCounter {
        field,
        value: value.to_owned(),
    })
}
