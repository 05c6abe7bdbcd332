//! Per-ply board representation.
//!
//! `BoardState` is an immutable-per-ply value: move application clones it and
//! returns the successor, so any earlier state kept in the game record stays
//! valid for undo. Pieces are stored as `[color][piece_kind]` bitboards with
//! cached occupancies.

use crate::game_state::chess_rules::BACK_RANK;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::{parse_fen, FenResult};

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

/// The part of a position that decides repetition: placement, side to move,
/// castling rights and en-passant target. Clocks are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pieces: [[u64; 6]; 2],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl BoardState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        let mut state = Self::new_empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            state.put_piece(make_square(file, 0), Piece::new(*kind, Color::White));
            state.put_piece(make_square(file, 1), Piece::new(PieceKind::Pawn, Color::White));
            state.put_piece(make_square(file, 6), Piece::new(PieceKind::Pawn, Color::Black));
            state.put_piece(make_square(file, 7), Piece::new(*kind, Color::Black));
        }
        state.castling_rights = CASTLE_ALL;
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> FenResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = square_bit(square);
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in [Color::White, Color::Black] {
            for kind in ALL_PIECE_KINDS {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(kind, color));
                }
            }
        }
        None
    }

    /// Piece kind on `square` if it belongs to `color`.
    pub fn kind_for_color(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_bit(square);
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.occupancy_all & square_bit(square) == 0
    }

    /// Places `piece`, replacing whatever stood on the square.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        self.clear_square(square);
        self.pieces[piece.color.index()][piece.kind.index()] |= square_bit(square);
        self.recalc_occupancy();
    }

    pub fn clear_square(&mut self, square: Square) {
        let mask = !square_bit(square);
        for color_boards in self.pieces.iter_mut() {
            for board in color_boards.iter_mut() {
                *board &= mask;
            }
        }
        self.recalc_occupancy();
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.bitboard(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            pieces: self.pieces,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
        }
    }

    pub fn recalc_occupancy(&mut self) {
        for color in [Color::White, Color::Black] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::White.index()]
            | self.occupancy_by_color[Color::Black.index()];
    }
}

#[cfg(test)]
mod tests {
    use super::BoardState;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_matches_starting_fen() {
        let built = BoardState::new_game();
        let parsed = BoardState::from_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(built, parsed);
        assert_eq!(built.get_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn piece_lookup_and_king_squares() {
        let game = BoardState::new_game();
        assert_eq!(
            game.piece_at(make_square(4, 0)),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            game.piece_at(make_square(3, 7)),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(game.piece_at(make_square(4, 4)), None);
        assert_eq!(game.king_square(Color::White), Some(4));
        assert_eq!(game.king_square(Color::Black), Some(60));
        assert_eq!(game.occupancy_all.count_ones(), 32);
    }

    #[test]
    fn put_piece_replaces_existing_occupant() {
        let mut game = BoardState::new_game();
        game.put_piece(make_square(4, 1), Piece::new(PieceKind::Queen, Color::Black));
        assert_eq!(
            game.piece_at(make_square(4, 1)),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(game.bitboard(Color::White, PieceKind::Pawn).count_ones(), 7);
        assert_eq!(game.occupancy_all.count_ones(), 32);
    }
}
