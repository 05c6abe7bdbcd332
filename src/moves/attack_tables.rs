//! Attack bitboards for every piece kind.
//!
//! Leaper (knight, king) and pawn-capture maps are built at compile time from
//! their step deltas. Sliding attacks are traced per call against the current
//! occupancy; a blocker square is included in the result so captures fall out
//! of the same mask.

use crate::game_state::chess_types::{Color, Square};

const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&KNIGHT_DELTAS);
pub const KING_ATTACKS: [u64; 64] = leaper_table(&KING_DELTAS);

/// `[color][square]` squares a pawn of `color` on `square` attacks.
pub const PAWN_ATTACKS: [[u64; 64]; 2] = [pawn_table(1), pawn_table(-1)];

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    PAWN_ATTACKS[color.index()][square as usize]
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, occupancy, &ROOK_DIRECTIONS)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, occupancy, &BISHOP_DIRECTIONS)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

pub fn slider_attacks(square: Square, occupancy: u64, directions: &[(i32, i32)]) -> u64 {
    let origin_file = (square % 8) as i32;
    let origin_rank = (square / 8) as i32;
    let mut attacks = 0u64;

    for &(file_step, rank_step) in directions {
        let mut file = origin_file + file_step;
        let mut rank = origin_rank + rank_step;
        while (0..8).contains(&file) && (0..8).contains(&rank) {
            let bit = 1u64 << (rank * 8 + file);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            file += file_step;
            rank += rank_step;
        }
    }

    attacks
}

const fn leaper_table(deltas: &[(i32, i32); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0usize;
        while i < 8 {
            let (df, dr) = deltas[i];
            table[sq] |= bit_if_on_board(file + df, rank + dr);
            i += 1;
        }
        sq += 1;
    }

    table
}

const fn pawn_table(rank_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        table[sq] = bit_if_on_board(file - 1, rank + rank_step)
            | bit_if_on_board(file + 1, rank + rank_step);
        sq += 1;
    }

    table
}

const fn bit_if_on_board(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        0
    } else {
        1u64 << (rank * 8 + file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A1: Square = 0;
    const D4: Square = 27;
    const H8: Square = 63;

    #[test]
    fn leaper_counts_at_center_and_corner() {
        assert_eq!(knight_attacks(D4).count_ones(), 8);
        assert_eq!(knight_attacks(A1).count_ones(), 2);
        assert_eq!(king_attacks(D4).count_ones(), 8);
        assert_eq!(king_attacks(H8).count_ones(), 3);
    }

    #[test]
    fn pawn_attacks_point_forward_for_each_color() {
        // e4 white pawn hits d5 and f5; black pawn on e4 hits d3 and f3.
        let e4 = 28;
        assert_eq!(pawn_attacks(Color::White, e4), (1u64 << 35) | (1u64 << 37));
        assert_eq!(pawn_attacks(Color::Black, e4), (1u64 << 19) | (1u64 << 21));
        // Edge file only has one capture.
        assert_eq!(pawn_attacks(Color::White, 8).count_ones(), 1);
    }

    #[test]
    fn sliders_stop_on_blockers() {
        assert_eq!(rook_attacks(D4, 0).count_ones(), 14);
        assert_eq!(bishop_attacks(D4, 0).count_ones(), 13);

        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(A1, blocker_on_a4);
        assert_ne!(attacks & blocker_on_a4, 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_eq!(queen_attacks(D4, 0).count_ones(), 27);
    }
}
