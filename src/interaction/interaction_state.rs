//! Event, state and effect types of the interaction layer.

use crate::annotations::annotation_store::AnnotationColor;
use crate::game_controller::move_feedback::MoveSound;
use crate::game_state::chess_types::{PieceKind, Square};
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Moves pieces.
    Primary,
    /// Draws arrows and highlights.
    Secondary,
}

/// Pointer events in board pixels, origin at the board's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { button: PointerButton, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { button: PointerButton, x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardKey {
    Left,
    Right,
    Up,
    Down,
    X,
    R,
    C,
    L,
    H,
    S,
    F,
    F11,
    Escape,
    N,
}

impl BoardKey {
    /// Parses key names as a windowing toolkit reports them (`left`, `F11`,
    /// `Escape`, `x`).
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name.trim().to_ascii_lowercase().as_str() {
            "left" => BoardKey::Left,
            "right" => BoardKey::Right,
            "up" => BoardKey::Up,
            "down" => BoardKey::Down,
            "x" => BoardKey::X,
            "r" => BoardKey::R,
            "c" => BoardKey::C,
            "l" => BoardKey::L,
            "h" => BoardKey::H,
            "s" => BoardKey::S,
            "f" => BoardKey::F,
            "f11" => BoardKey::F11,
            "escape" | "esc" => BoardKey::Escape,
            "n" => BoardKey::N,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Movable,
    NotMovable,
}

/// Work for the presentation shell that the core does not do itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRequest {
    PlaySound { sound: MoveSound, game_over: bool },
    /// Flash the square of a king that a rejected move would have exposed.
    FlashIllegal { square: Square },
    OpenHelp,
    OpenSettings,
    ToggleFullscreen,
    ExitFullscreen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    Selected {
        square: Square,
        /// Distinct legal destinations of the selected piece.
        legal_moves: Vec<Square>,
        show_indicators: bool,
        /// Where the primary button went down, while it is still held.
        press_origin: Option<(f32, f32)>,
    },
    Dragging {
        square: Square,
        pointer: (f32, f32),
    },
    AwaitingPromotion {
        pending: ChessMove,
        candidates: Vec<PieceKind>,
    },
    DrawingArrow {
        from: Square,
        color: AnnotationColor,
    },
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Selected { .. } => "selected",
            InteractionState::Dragging { .. } => "dragging",
            InteractionState::AwaitingPromotion { .. } => "awaiting-promotion",
            InteractionState::DrawingArrow { .. } => "drawing-arrow",
        }
    }

    /// Square whose piece is picked up, if any.
    pub fn active_square(&self) -> Option<Square> {
        match self {
            InteractionState::Selected { square, .. } | InteractionState::Dragging { square, .. } => {
                Some(*square)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_parse_case_insensitively() {
        assert_eq!(BoardKey::from_name("Left"), Some(BoardKey::Left));
        assert_eq!(BoardKey::from_name("F11"), Some(BoardKey::F11));
        assert_eq!(BoardKey::from_name("esc"), Some(BoardKey::Escape));
        assert_eq!(BoardKey::from_name("space"), None);
    }
}
