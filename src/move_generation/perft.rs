use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::square_bit;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::chess_move::MoveFlag;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

pub fn perft<G: MoveGenerator>(generator: &G, board: &BoardState, depth: u8) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(board)?;
    let mut total = PerftCounts::default();

    for mv in root_moves {
        perft_recurse(generator, board, &mv, depth, 1, &mut total)?;
    }

    Ok(total)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    parent: &BoardState,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth == search_depth {
        counts.nodes += 1;

        let mover = parent.side_to_move;
        let captured = parent.occupancy_by_color[mover.opposite().index()]
            & square_bit(mv.chess_move.to)
            != 0;
        if mv.chess_move.flag == MoveFlag::EnPassantCapture {
            counts.en_passant += 1;
            counts.captures += 1;
        } else if captured {
            counts.captures += 1;
        }
        if mv.chess_move.is_castle() {
            counts.castles += 1;
        }
        if mv.chess_move.is_promotion() {
            counts.promotions += 1;
        }

        if is_king_in_check(&mv.board_after, mv.board_after.side_to_move) {
            counts.checks += 1;
            if generator.generate_legal_moves(&mv.board_after)?.is_empty() {
                counts.checkmates += 1;
            }
        }

        return Ok(());
    }

    let moves = generator.generate_legal_moves(&mv.board_after)?;
    for child in moves {
        perft_recurse(
            generator,
            &mv.board_after,
            &child,
            search_depth,
            current_depth + 1,
            counts,
        )?;
    }

    Ok(())
}
