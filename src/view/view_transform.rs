//! Logical square to display cell mapping.
//!
//! Display cells are `(column, row)` with `(0, 0)` at the top-left. The
//! unflipped, unrotated view has white at the bottom. Flip reverses both
//! files and ranks; rotation then turns the whole grid clockwise in quarter
//! turns.

use crate::game_state::chess_types::{file_of, make_square, rank_of, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const fn clockwise(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    pub const fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    flipped: bool,
    rotation: Rotation,
    show_coordinates: bool,
    square_size_px: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(65.0, true)
    }
}

impl ViewTransform {
    pub fn new(square_size_px: f32, show_coordinates: bool) -> Self {
        Self {
            flipped: false,
            rotation: Rotation::Deg0,
            show_coordinates,
            square_size_px,
        }
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn rotate(&mut self) {
        self.rotation = self.rotation.clockwise();
    }

    pub fn toggle_coordinates(&mut self) {
        self.show_coordinates = !self.show_coordinates;
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn shows_coordinates(&self) -> bool {
        self.show_coordinates
    }

    pub fn square_size_px(&self) -> f32 {
        self.square_size_px
    }

    /// Applied by the shell after a window resize. Non-positive sizes are
    /// ignored.
    pub fn set_square_size_px(&mut self, square_size_px: f32) {
        if square_size_px.is_finite() && square_size_px > 0.0 {
            self.square_size_px = square_size_px;
        }
    }

    pub fn display_cell(&self, square: Square) -> (u8, u8) {
        let (file, rank) = (file_of(square), rank_of(square));
        let (mut column, mut row) = if self.flipped {
            (7 - file, rank)
        } else {
            (file, 7 - rank)
        };
        for _ in 0..self.rotation.quarter_turns() {
            (column, row) = (7 - row, column);
        }
        (column, row)
    }

    pub fn square_at_cell(&self, column: u8, row: u8) -> Option<Square> {
        if column > 7 || row > 7 {
            return None;
        }
        let (mut column, mut row) = (column, row);
        for _ in 0..self.rotation.quarter_turns() {
            (column, row) = (row, 7 - column);
        }
        Some(if self.flipped {
            make_square(7 - column, row)
        } else {
            make_square(column, 7 - row)
        })
    }

    /// Square under a pointer position relative to the board's top-left
    /// corner; `None` off the board.
    pub fn square_at_pixel(&self, x: f32, y: f32) -> Option<Square> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let column = (x / self.square_size_px).floor();
        let row = (y / self.square_size_px).floor();
        if column >= 8.0 || row >= 8.0 {
            return None;
        }
        self.square_at_cell(column as u8, row as u8)
    }

    /// Top-left pixel of `square`.
    pub fn square_origin_px(&self, square: Square) -> (f32, f32) {
        let (column, row) = self.display_cell(square);
        (
            f32::from(column) * self.square_size_px,
            f32::from(row) * self.square_size_px,
        )
    }

    pub fn square_center_px(&self, square: Square) -> (f32, f32) {
        let (x, y) = self.square_origin_px(square);
        let half = self.square_size_px / 2.0;
        (x + half, y + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_has_a8_top_left_and_h1_bottom_right() {
        let view = ViewTransform::default();
        assert_eq!(view.display_cell(56), (0, 0));
        assert_eq!(view.display_cell(7), (7, 7));
        assert_eq!(view.square_at_pixel(10.0, 10.0), Some(56));
        assert_eq!(view.square_at_pixel(519.0, 519.0), Some(7));
        assert_eq!(view.square_at_pixel(520.0, 10.0), None);
        assert_eq!(view.square_at_pixel(-1.0, 10.0), None);
    }

    #[test]
    fn flip_twice_and_rotate_four_times_are_identity() {
        let base = ViewTransform::default();
        let mut view = base;
        view.flip();
        assert_eq!(view.display_cell(56), (7, 7));
        view.flip();
        assert_eq!(view, base);

        for _ in 0..4 {
            view.rotate();
        }
        assert_eq!(view, base);
    }

    #[test]
    fn cell_mapping_inverts_under_every_orientation() {
        let mut view = ViewTransform::default();
        for flip in [false, true] {
            if flip {
                view.flip();
            }
            for _ in 0..4 {
                for square in 0..64u8 {
                    let (column, row) = view.display_cell(square);
                    assert_eq!(view.square_at_cell(column, row), Some(square));
                    let (x, y) = view.square_center_px(square);
                    assert_eq!(view.square_at_pixel(x, y), Some(square));
                }
                view.rotate();
            }
        }
    }

    #[test]
    fn quarter_turn_moves_a8_to_the_top_right() {
        let mut view = ViewTransform::default();
        view.rotate();
        assert_eq!(view.rotation(), Rotation::Deg90);
        assert_eq!(view.display_cell(56), (7, 0));
        assert_eq!(view.display_cell(0), (0, 0));
    }

    #[test]
    fn coordinates_toggle_changes_nothing_else() {
        let mut view = ViewTransform::default();
        let before: Vec<(u8, u8)> = (0..64).map(|sq| view.display_cell(sq)).collect();
        view.toggle_coordinates();
        assert!(!view.shows_coordinates());
        let after: Vec<(u8, u8)> = (0..64).map(|sq| view.display_cell(sq)).collect();
        assert_eq!(before, after);
    }
}
