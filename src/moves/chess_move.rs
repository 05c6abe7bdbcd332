//! Move value type.
//!
//! A `ChessMove` carries exactly what is needed to replay it on the position
//! it was generated from: origin, destination, optional promotion and a flag
//! for the compound moves whose side effects are not implied by the squares.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal,
    DoublePawnPush,
    EnPassantCapture,
    KingSideCastle,
    QueenSideCastle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
    pub flag: MoveFlag,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
            flag: MoveFlag::Normal,
        }
    }

    #[inline]
    pub const fn with_flag(mut self, flag: MoveFlag) -> Self {
        self.flag = flag;
        self
    }

    #[inline]
    pub const fn with_promotion(mut self, piece: PieceKind) -> Self {
        self.promotion = Some(piece);
        self
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.flag, MoveFlag::KingSideCastle | MoveFlag::QueenSideCastle)
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    #[inline]
    pub fn connects(&self, from: Square, to: Square) -> bool {
        self.from == from && self.to == to
    }

    /// Long algebraic (UCI style) text, e.g. `e7e8q`.
    pub fn to_long_algebraic(&self) -> String {
        let mut out = String::with_capacity(5);
        out.push_str(&square_to_algebraic(self.from));
        out.push_str(&square_to_algebraic(self.to));
        if let Some(piece) = self.promotion {
            out.push(piece.letter().to_ascii_lowercase());
        }
        out
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_algebraic_includes_promotion_letter() {
        let e7 = 52;
        let e8 = 60;
        let mv = ChessMove::new(e7, e8).with_promotion(PieceKind::Rook);
        assert_eq!(mv.to_long_algebraic(), "e7e8r");
        assert_eq!(ChessMove::new(12, 28).to_string(), "e2e4");
    }

    #[test]
    fn flags_classify_castles() {
        let castle = ChessMove::new(4, 6).with_flag(MoveFlag::KingSideCastle);
        assert!(castle.is_castle());
        assert!(!castle.is_promotion());
        assert!(castle.connects(4, 6));
        assert!(!ChessMove::new(4, 5).is_castle());
    }
}
