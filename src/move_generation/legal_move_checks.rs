use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn is_king_in_check(board: &BoardState, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &BoardState, square: Square, attacker_color: Color) -> bool {
    attackers_to_square(board, square, attacker_color) != 0
}

/// Bitboard of `attacker_color` pieces attacking `square`.
///
/// Uses the "look back from the target" trick: a pawn of `attacker_color`
/// attacks `square` exactly when a pawn of the other color on `square` would
/// attack the pawn's square.
pub fn attackers_to_square(board: &BoardState, square: Square, attacker_color: Color) -> u64 {
    let occupancy = board.occupancy_all;
    let bishops_queens = board.bitboard(attacker_color, PieceKind::Bishop)
        | board.bitboard(attacker_color, PieceKind::Queen);
    let rooks_queens = board.bitboard(attacker_color, PieceKind::Rook)
        | board.bitboard(attacker_color, PieceKind::Queen);

    (pawn_attacks(attacker_color.opposite(), square) & board.bitboard(attacker_color, PieceKind::Pawn))
        | (knight_attacks(square) & board.bitboard(attacker_color, PieceKind::Knight))
        | (king_attacks(square) & board.bitboard(attacker_color, PieceKind::King))
        | (bishop_attacks(square, occupancy) & bishops_queens)
        | (rook_attacks(square, occupancy) & rooks_queens)
}

/// Pieces currently giving check to `color`'s king.
pub fn checkers(board: &BoardState, color: Color) -> u64 {
    match board.king_square(color) {
        Some(king_sq) => attackers_to_square(board, king_sq, color.opposite()),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> BoardState {
        BoardState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn pawn_attacks_are_directional() {
        // White pawn on d4 attacks e5 but not e3.
        let game = board("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&game, 36, Color::White));
        assert!(!is_square_attacked(&game, 20, Color::White));
    }

    #[test]
    fn slider_attack_is_blocked() {
        let open = board("4k3/8/8/8/8/8/8/R3K3 b - - 0 1");
        assert!(is_square_attacked(&open, 56, Color::White));
        let blocked = board("4k3/8/8/8/p7/8/8/R3K3 b - - 0 1");
        assert!(!is_square_attacked(&blocked, 56, Color::White));
    }

    #[test]
    fn double_check_has_two_checkers() {
        // Rook e1 and knight d6 both check the king on e8.
        let game = board("4k3/8/3N4/8/8/8/8/K3R3 b - - 0 1");
        assert!(is_king_in_check(&game, Color::Black));
        assert_eq!(checkers(&game, Color::Black).count_ones(), 2);
        assert!(!is_king_in_check(&game, Color::White));
    }
}
