//! Terminal-oriented Unicode board renderer.
//!
//! Draws the board as the current view shows it (flip, rotation and
//! coordinate labels applied) for the console driver, tests and
//! diagnostics in text environments. Highlighted squares are bracketed;
//! arrows and highlight colors are listed under the board.

use crate::annotations::annotation_store::{Annotation, AnnotationStore};
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, Piece, PieceKind, Square};
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};
use crate::view::view_transform::{Rotation, ViewTransform};

pub fn render_game_state(
    board: &BoardState,
    view: &ViewTransform,
    annotations: &AnnotationStore,
) -> String {
    let mut out = String::new();
    // Squares in a display row share a rank unless the view is turned sideways.
    let rows_are_ranks = matches!(view.rotation(), Rotation::Deg0 | Rotation::Deg180);

    let edge_labels = view.shows_coordinates().then(|| column_labels(view, rows_are_ranks));
    if let Some(labels) = &edge_labels {
        out.push_str(labels);
        out.push('\n');
    }

    for row in 0..8u8 {
        let label = view
            .square_at_cell(0, row)
            .map(|square| row_label(square, rows_are_ranks));
        if let (true, Some(label)) = (view.shows_coordinates(), label) {
            out.push(label);
            out.push(' ');
        }

        for column in 0..8u8 {
            let Some(square) = view.square_at_cell(column, row) else {
                continue;
            };
            let symbol = board.piece_at(square).map_or('·', piece_to_unicode);
            if annotations.highlight_at(square).is_some() {
                out.push('[');
                out.push(symbol);
                out.push(']');
            } else {
                out.push(' ');
                out.push(symbol);
                out.push(' ');
            }
        }

        if let (true, Some(label)) = (view.shows_coordinates(), label) {
            out.push(' ');
            out.push(label);
        }
        out.push('\n');
    }

    if let Some(labels) = &edge_labels {
        out.push_str(labels);
        out.push('\n');
    }

    for annotation in annotations.annotations() {
        match annotation {
            Annotation::Arrow { from, to, color } => out.push_str(&format!(
                "arrow {}->{} {}\n",
                square_to_algebraic(from),
                square_to_algebraic(to),
                color.name()
            )),
            Annotation::Highlight { square, color } => out.push_str(&format!(
                "highlight {} {}\n",
                square_to_algebraic(square),
                color.name()
            )),
        }
    }

    out.trim_end().to_owned()
}

fn row_label(square: Square, rows_are_ranks: bool) -> char {
    if rows_are_ranks {
        rank_char(square)
    } else {
        file_char(square)
    }
}

fn column_labels(view: &ViewTransform, rows_are_ranks: bool) -> String {
    let mut labels = String::from(" ");
    for column in 0..8u8 {
        if let Some(square) = view.square_at_cell(column, 7) {
            labels.push(' ');
            labels.push(row_label(square, !rows_are_ranks));
            labels.push(' ');
        }
    }
    labels
}

pub fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::annotation_store::AnnotationColor;

    #[test]
    fn start_position_with_coordinates() {
        let text = render_game_state(
            &BoardState::new_game(),
            &ViewTransform::default(),
            &AnnotationStore::new(),
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  a  b  c  d  e  f  g  h ");
        assert_eq!(lines[1], "8  ♜  ♞  ♝  ♛  ♚  ♝  ♞  ♜  8");
        assert_eq!(lines[8], "1  ♖  ♘  ♗  ♕  ♔  ♗  ♘  ♖  1");
        assert_eq!(lines[9], "  a  b  c  d  e  f  g  h");
    }

    #[test]
    fn flipped_view_without_coordinates_puts_black_at_the_bottom() {
        let mut view = ViewTransform::default();
        view.flip();
        view.toggle_coordinates();
        let text = render_game_state(&BoardState::new_game(), &view, &AnnotationStore::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], " ♖  ♘  ♗  ♔  ♕  ♗  ♘  ♖ ");
        assert_eq!(lines[7], " ♜  ♞  ♝  ♚  ♛  ♝  ♞  ♜");
    }

    #[test]
    fn quarter_turn_labels_rows_with_files() {
        let mut view = ViewTransform::default();
        view.rotate();
        let text = render_game_state(&BoardState::new_game(), &view, &AnnotationStore::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  1  2  3  4  5  6  7  8 ");
        assert!(lines[1].starts_with("a  ♖  ♙"));
    }

    #[test]
    fn annotations_are_marked_and_listed() {
        let mut annotations = AnnotationStore::new();
        annotations.toggle_highlight(27, AnnotationColor::Red);
        annotations.toggle_arrow(12, 28, AnnotationColor::Green);
        let mut view = ViewTransform::default();
        view.toggle_coordinates();
        let text = render_game_state(&BoardState::new_game(), &view, &annotations);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[4], " ·  ·  · [·] ·  ·  ·  · ");
        assert!(text.contains("highlight d4 red"));
        assert!(text.contains("arrow e2->e4 green"));
    }
}
