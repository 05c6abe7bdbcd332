//! Standard Algebraic Notation output for the move list.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{file_of, rank_of, PieceKind};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::{generate_legal_moves, is_in_check};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::chess_move::{ChessMove, MoveFlag};
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};

/// Renders `mv`, a legal move in `board`, as SAN (`Nbd7`, `exd6`, `e8=Q+`,
/// `O-O-O#`).
pub fn move_to_san(board: &BoardState, mv: ChessMove) -> MoveGenResult<String> {
    let moved = board
        .kind_for_color(board.side_to_move, mv.from)
        .ok_or(MoveGenerationError::EmptyOrigin(mv.from))?;

    let mut san = match mv.flag {
        MoveFlag::KingSideCastle => "O-O".to_owned(),
        MoveFlag::QueenSideCastle => "O-O-O".to_owned(),
        _ => piece_move_text(board, mv, moved)?,
    };

    let after = apply_move(board, mv)?;
    if is_in_check(&after) {
        if generate_legal_moves(&after)?.is_empty() {
            san.push('#');
        } else {
            san.push('+');
        }
    }

    Ok(san)
}

fn piece_move_text(board: &BoardState, mv: ChessMove, moved: PieceKind) -> MoveGenResult<String> {
    let is_capture = mv.flag == MoveFlag::EnPassantCapture || !board.is_empty(mv.to);
    let mut out = String::with_capacity(8);

    if moved == PieceKind::Pawn {
        if is_capture {
            out.push(file_char(mv.from));
        }
    } else {
        out.push(moved.letter());
        out.push_str(&disambiguation(board, mv, moved)?);
    }

    if is_capture {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(mv.to));

    if let Some(piece) = mv.promotion {
        out.push('=');
        out.push(piece.letter());
    }

    Ok(out)
}

fn disambiguation(board: &BoardState, mv: ChessMove, moved: PieceKind) -> MoveGenResult<String> {
    let rivals: Vec<ChessMove> = generate_legal_moves(board)?
        .into_iter()
        .filter(|other| {
            other.to == mv.to
                && other.from != mv.from
                && board.kind_for_color(board.side_to_move, other.from) == Some(moved)
        })
        .collect();

    if rivals.is_empty() {
        return Ok(String::new());
    }
    if rivals.iter().all(|other| file_of(other.from) != file_of(mv.from)) {
        return Ok(file_char(mv.from).to_string());
    }
    if rivals.iter().all(|other| rank_of(other.from) != rank_of(mv.from)) {
        return Ok(rank_char(mv.from).to_string());
    }
    Ok(square_to_algebraic(mv.from))
}

#[cfg(test)]
mod tests {
    use super::move_to_san;
    use crate::game_state::board_state::BoardState;
    use crate::game_state::chess_types::PieceKind;
    use crate::moves::chess_move::{ChessMove, MoveFlag};

    fn board(fen: &str) -> BoardState {
        BoardState::from_fen(fen).expect("test FEN should parse")
    }

    fn san(fen: &str, mv: ChessMove) -> String {
        move_to_san(&board(fen), mv).expect("SAN should render")
    }

    #[test]
    fn plain_pawn_and_piece_moves() {
        let start = BoardState::new_game();
        assert_eq!(
            move_to_san(&start, ChessMove::new(12, 28).with_flag(MoveFlag::DoublePawnPush))
                .expect("SAN should render"),
            "e4"
        );
        assert_eq!(move_to_san(&start, ChessMove::new(6, 21)).expect("SAN should render"), "Nf3");
    }

    #[test]
    fn captures_and_en_passant() {
        assert_eq!(
            san(
                "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3",
                ChessMove::new(36, 43).with_flag(MoveFlag::EnPassantCapture)
            ),
            "exd6"
        );
        assert_eq!(san("4k3/8/8/3p4/8/8/8/3QK3 w - - 0 1", ChessMove::new(3, 35)), "Qxd5");
    }

    #[test]
    fn knights_are_disambiguated_by_file_then_rank() {
        // Knights on b1 and f1 can both reach d2.
        assert_eq!(san("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1", ChessMove::new(1, 11)), "Nbd2");
        // Knights on b1 and b3 share a file and both reach d2.
        assert_eq!(san("4k3/8/8/8/8/1N6/8/1N2K3 w - - 0 1", ChessMove::new(1, 11)), "N1d2");
    }

    #[test]
    fn castling_promotion_and_mate_suffix() {
        assert_eq!(
            san(
                "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
                ChessMove::new(4, 2).with_flag(MoveFlag::QueenSideCastle)
            ),
            "O-O-O"
        );
        assert_eq!(
            san(
                "8/4P3/8/8/8/8/k7/4K3 w - - 0 1",
                ChessMove::new(52, 60).with_promotion(PieceKind::Rook)
            ),
            "e8=R"
        );
        assert_eq!(
            san(
                "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
                ChessMove::new(59, 31)
            ),
            "Qh4#"
        );
    }
}
