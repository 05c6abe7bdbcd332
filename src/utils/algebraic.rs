//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices reused by FEN, SAN and the console driver.

use thiserror::Error;

use crate::game_state::chess_types::{file_of, make_square, rank_of, Square};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraicError {
    #[error("invalid algebraic square: {0:?}")]
    InvalidSquare(String),
    #[error("invalid algebraic file: {0}")]
    InvalidFile(char),
    #[error("invalid algebraic rank: {0}")]
    InvalidRank(char),
}

/// Convert algebraic notation (for example: "e4") to a square index.
pub fn algebraic_to_square(square: &str) -> Result<Square, AlgebraicError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(AlgebraicError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(AlgebraicError::InvalidFile(file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(AlgebraicError::InvalidRank(rank as char));
    }

    Ok(make_square(file - b'a', rank - b'1'))
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + file_of(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + rank_of(square))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let mut out = String::with_capacity(2);
    out.push(file_char(square));
    out.push(rank_char(square));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_squares_convert_both_ways() {
        assert_eq!(algebraic_to_square("a1"), Ok(0));
        assert_eq!(algebraic_to_square("h8"), Ok(63));
        assert_eq!(algebraic_to_square("E4"), Ok(28));
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
    }

    #[test]
    fn malformed_squares_are_rejected() {
        assert_eq!(algebraic_to_square("i1"), Err(AlgebraicError::InvalidFile('i')));
        assert_eq!(algebraic_to_square("a9"), Err(AlgebraicError::InvalidRank('9')));
        assert!(matches!(
            algebraic_to_square("e10"),
            Err(AlgebraicError::InvalidSquare(_))
        ));
    }
}
