//! Pointer and keyboard gesture resolution.
//!
//! `InteractionStateMachine` owns the game controller, the annotation layer
//! and the view, and turns raw input into move attempts, annotation edits or
//! view changes. Each event is processed to completion before the next one;
//! effects the shell must perform are returned as `ShellRequest`s.

use tracing::{debug, trace};

use crate::annotations::annotation_store::AnnotationStore;
use crate::game_controller::game_controller::{
    AppliedMove, AttemptOutcome, ControllerError, ControllerResult, GameController, IllegalReason,
};
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{file_of, rank_of, try_square, Color, PieceKind, Square};
use crate::interaction::interaction_state::{
    BoardKey, CursorHint, InteractionState, PointerButton, PointerEvent, ShellRequest,
};
use crate::interaction::modifiers::{color_from_modifiers, Modifiers};
use crate::moves::chess_move::ChessMove;
use crate::settings::board_settings::BoardSettings;
use crate::view::view_transform::ViewTransform;

#[derive(Debug, Clone)]
pub struct InteractionStateMachine {
    controller: GameController,
    annotations: AnnotationStore,
    view: ViewTransform,
    settings: BoardSettings,
    modifiers: Modifiers,
    state: InteractionState,
}

impl InteractionStateMachine {
    pub fn new(settings: BoardSettings) -> ControllerResult<Self> {
        Self::with_controller(GameController::new()?, settings)
    }

    pub fn with_controller(
        mut controller: GameController,
        settings: BoardSettings,
    ) -> ControllerResult<Self> {
        controller.set_default_promotion(settings.default_promotion_piece)?;
        Ok(Self {
            controller,
            annotations: AnnotationStore::new(),
            view: ViewTransform::new(settings.square_size_px, settings.show_coordinates),
            settings,
            modifiers: Modifiers::empty(),
            state: InteractionState::Idle,
        })
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    pub fn board(&self) -> &BoardState {
        self.controller.board()
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Replaces the settings; board size and coordinate visibility are
    /// re-read from them.
    pub fn apply_settings(&mut self, settings: BoardSettings) -> ControllerResult<()> {
        self.controller
            .set_default_promotion(settings.default_promotion_piece)?;
        self.view.set_square_size_px(settings.square_size_px);
        if self.view.shows_coordinates() != settings.show_coordinates {
            self.view.toggle_coordinates();
        }
        self.settings = settings;
        self.refresh_indicators();
        Ok(())
    }

    /// Updates the held modifier keys. Indicator visibility follows shift
    /// immediately; an arrow's color does not change once started.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
        self.refresh_indicators();
    }

    fn indicators_wanted(&self) -> bool {
        self.settings.show_legal_moves || self.modifiers.contains(Modifiers::SHIFT)
    }

    fn refresh_indicators(&mut self) {
        let wanted = self.indicators_wanted();
        if let InteractionState::Selected {
            show_indicators, ..
        } = &mut self.state
        {
            *show_indicators = wanted;
        }
    }

    /// Destinations to draw markers on, empty unless indicators are shown.
    pub fn indicator_squares(&self) -> &[Square] {
        match &self.state {
            InteractionState::Selected {
                legal_moves,
                show_indicators: true,
                ..
            } => legal_moves.as_slice(),
            _ => &[],
        }
    }

    /// Replaces the game with `board` and drops all transient state.
    pub fn set_position(&mut self, board: BoardState) -> ControllerResult<()> {
        self.controller.set_position(board)?;
        self.annotations.clear_all();
        self.transition(InteractionState::Idle);
        Ok(())
    }

    fn transition(&mut self, next: InteractionState) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&next) {
            debug!(from = self.state.name(), to = next.name(), "interaction transition");
        }
        self.state = next;
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<ShellRequest> {
        let mut requests = Vec::new();
        match event {
            PointerEvent::Down { button, x, y } => {
                let square = self.view.square_at_pixel(x, y);
                match button {
                    PointerButton::Primary => self.primary_down(square, (x, y), &mut requests),
                    PointerButton::Secondary => self.secondary_down(square),
                }
            }
            PointerEvent::Move { x, y } => self.pointer_moved((x, y)),
            PointerEvent::Up { button, x, y } => {
                let square = self.view.square_at_pixel(x, y);
                match button {
                    PointerButton::Primary => self.primary_up(square, &mut requests),
                    PointerButton::Secondary => self.secondary_up(square),
                }
            }
        }
        requests
    }

    fn primary_down(&mut self, square: Option<Square>, at: (f32, f32), requests: &mut Vec<ShellRequest>) {
        let state = std::mem::replace(&mut self.state, InteractionState::Idle);
        match state {
            InteractionState::AwaitingPromotion { pending, candidates } => {
                let choice = square.and_then(|sq| {
                    menu_layout(pending, self.board().side_to_move, &candidates)
                        .into_iter()
                        .find(|(menu_square, _)| *menu_square == sq)
                        .map(|(_, piece)| piece)
                });
                match choice {
                    Some(piece) => self.resolve_promotion(piece, requests),
                    None => self.cancel_promotion(),
                }
            }
            InteractionState::Selected {
                square: selected,
                legal_moves,
                show_indicators,
                ..
            } => match square {
                Some(sq) if sq == selected => self.transition(InteractionState::Idle),
                Some(sq) if !legal_moves.contains(&sq) && self.is_own_piece(sq) => {
                    self.select(sq, at)
                }
                // Off-board presses, destinations and other squares keep the
                // selection until release decides.
                _ => self.transition(InteractionState::Selected {
                    square: selected,
                    legal_moves,
                    show_indicators,
                    press_origin: None,
                }),
            },
            InteractionState::Dragging { .. } | InteractionState::DrawingArrow { .. } | InteractionState::Idle => {
                match square {
                    Some(sq) if self.is_own_piece(sq) => self.select(sq, at),
                    _ => self.transition(InteractionState::Idle),
                }
            }
        }
    }

    fn select(&mut self, square: Square, at: (f32, f32)) {
        let legal_moves = self.controller.legal_destinations(square);
        trace!(square, destinations = legal_moves.len(), "piece selected");
        self.transition(InteractionState::Selected {
            square,
            legal_moves,
            show_indicators: self.indicators_wanted(),
            press_origin: Some(at),
        });
    }

    fn is_own_piece(&self, square: Square) -> bool {
        let board = self.board();
        board.kind_for_color(board.side_to_move, square).is_some()
    }

    fn pointer_moved(&mut self, at: (f32, f32)) {
        let threshold = self.settings.drag_threshold_px;
        let next = match &mut self.state {
            InteractionState::Selected {
                square,
                press_origin: Some(origin),
                ..
            } => {
                let (dx, dy) = (at.0 - origin.0, at.1 - origin.1);
                ((dx * dx + dy * dy).sqrt() > threshold).then(|| InteractionState::Dragging {
                    square: *square,
                    pointer: at,
                })
            }
            InteractionState::Dragging { pointer, .. } => {
                *pointer = at;
                None
            }
            _ => None,
        };
        if let Some(next) = next {
            self.transition(next);
        }
    }

    fn primary_up(&mut self, square: Option<Square>, requests: &mut Vec<ShellRequest>) {
        let state = std::mem::replace(&mut self.state, InteractionState::Idle);
        match state {
            InteractionState::Selected {
                square: selected,
                legal_moves,
                show_indicators,
                ..
            } => match square {
                Some(sq) if sq != selected => self.try_move(selected, sq, requests),
                // Releasing where the press started keeps the selection for a
                // second click.
                _ => self.transition(InteractionState::Selected {
                    square: selected,
                    legal_moves,
                    show_indicators,
                    press_origin: None,
                }),
            },
            InteractionState::Dragging { square: origin, .. } => match square {
                Some(sq) if sq != origin => self.try_move(origin, sq, requests),
                _ => {
                    debug!(square = origin, "drag snapped back");
                    self.transition(InteractionState::Idle);
                }
            },
            other => self.state = other,
        }
    }

    fn try_move(&mut self, from: Square, to: Square, requests: &mut Vec<ShellRequest>) {
        let auto = self.settings.auto_promotion_enabled && self.modifiers.is_empty();
        self.controller.auto_promotion_override(auto);

        match self.controller.attempt_move(from, to) {
            Ok(AttemptOutcome::Applied(applied)) => self.after_applied(&applied, requests),
            Ok(AttemptOutcome::PromotionPending(candidates)) => {
                self.transition(InteractionState::AwaitingPromotion {
                    pending: ChessMove::new(from, to),
                    candidates,
                });
            }
            Err(ControllerError::IllegalMove { reason, .. }) => {
                if reason == IllegalReason::LeavesKingInCheck {
                    let board = self.board();
                    if let Some(king) = board.king_square(board.side_to_move) {
                        requests.push(ShellRequest::FlashIllegal { square: king });
                    }
                }
                self.transition(InteractionState::Idle);
            }
            Err(err) => {
                debug!(%err, "move attempt failed");
                self.transition(InteractionState::Idle);
            }
        }
    }

    fn after_applied(&mut self, applied: &AppliedMove, requests: &mut Vec<ShellRequest>) {
        self.annotations.clear_all();
        requests.push(ShellRequest::PlaySound {
            sound: applied.feedback.sound,
            game_over: applied.feedback.game_over,
        });
        self.transition(InteractionState::Idle);
    }

    fn resolve_promotion(&mut self, piece: PieceKind, requests: &mut Vec<ShellRequest>) {
        match self.controller.resolve_promotion(piece) {
            Ok(applied) => self.after_applied(&applied, requests),
            Err(err) => {
                debug!(%err, "promotion choice rejected");
                self.cancel_promotion();
            }
        }
    }

    fn cancel_promotion(&mut self) {
        if let Err(err) = self.controller.cancel_promotion() {
            debug!(%err, "no promotion to cancel");
        }
        self.transition(InteractionState::Idle);
    }

    /// Chooses a promotion piece without a pointer, as a menu keyboard
    /// shortcut would. Ignored unless a promotion is pending.
    pub fn choose_promotion(&mut self, piece: PieceKind) -> Vec<ShellRequest> {
        let mut requests = Vec::new();
        if let InteractionState::AwaitingPromotion { candidates, .. } = &self.state {
            if candidates.contains(&piece) {
                self.resolve_promotion(piece, &mut requests);
            } else {
                debug!(?piece, "not an offered promotion piece");
            }
        }
        requests
    }

    /// Menu squares and their pieces while a promotion is pending.
    pub fn promotion_menu(&self) -> Vec<(Square, PieceKind)> {
        match &self.state {
            InteractionState::AwaitingPromotion { pending, candidates } => {
                menu_layout(*pending, self.board().side_to_move, candidates)
            }
            _ => Vec::new(),
        }
    }

    fn secondary_down(&mut self, square: Option<Square>) {
        let state = std::mem::replace(&mut self.state, InteractionState::Idle);
        match (state, square) {
            (InteractionState::AwaitingPromotion { .. }, _) => self.cancel_promotion(),
            // A held primary button blocks annotation; the drag is dropped.
            (InteractionState::Dragging { .. }, _) => self.transition(InteractionState::Idle),
            (_, Some(from)) => {
                let color = color_from_modifiers(self.modifiers);
                self.transition(InteractionState::DrawingArrow { from, color });
            }
            (_, None) => self.transition(InteractionState::Idle),
        }
    }

    fn secondary_up(&mut self, square: Option<Square>) {
        let state = std::mem::replace(&mut self.state, InteractionState::Idle);
        match (state, square) {
            (InteractionState::DrawingArrow { from, color }, Some(to)) => {
                let edit = if from == to {
                    self.annotations.toggle_highlight(to, color)
                } else {
                    self.annotations.toggle_arrow(from, to, color)
                };
                debug!(from, to, color = color.name(), ?edit, "annotation toggled");
                self.transition(InteractionState::Idle);
            }
            (InteractionState::DrawingArrow { .. }, None) => self.transition(InteractionState::Idle),
            (other, _) => self.state = other,
        }
    }

    pub fn handle_key(&mut self, key: BoardKey) -> Vec<ShellRequest> {
        let mut requests = Vec::new();
        match key {
            BoardKey::Left => {
                self.reset_gesture();
                match self.controller.undo() {
                    Ok(entry) => requests.push(ShellRequest::PlaySound {
                        sound: entry.feedback.sound,
                        game_over: false,
                    }),
                    Err(err) => debug!(%err, "undo ignored"),
                }
            }
            BoardKey::Right => {
                self.reset_gesture();
                match self.controller.redo() {
                    Ok(applied) => self.after_applied(&applied, &mut requests),
                    Err(err) => debug!(%err, "redo ignored"),
                }
            }
            BoardKey::Up => {
                self.reset_gesture();
                if let Err(err) = self.controller.undo_all() {
                    debug!(%err, "undo all ignored");
                }
            }
            BoardKey::Down => {
                self.reset_gesture();
                match self.controller.redo_all() {
                    Ok(_) => self.annotations.clear_all(),
                    Err(err) => debug!(%err, "redo all ignored"),
                }
            }
            BoardKey::N => {
                self.reset_gesture();
                match self.controller.new_game() {
                    Ok(()) => self.annotations.clear_all(),
                    Err(err) => debug!(%err, "new game failed"),
                }
            }
            BoardKey::X => self.view.flip(),
            BoardKey::R => self.view.rotate(),
            BoardKey::C | BoardKey::L => self.view.toggle_coordinates(),
            BoardKey::H => requests.push(ShellRequest::OpenHelp),
            BoardKey::S => requests.push(ShellRequest::OpenSettings),
            BoardKey::F | BoardKey::F11 => requests.push(ShellRequest::ToggleFullscreen),
            BoardKey::Escape => requests.push(ShellRequest::ExitFullscreen),
        }
        requests
    }

    fn reset_gesture(&mut self) {
        if matches!(self.state, InteractionState::AwaitingPromotion { .. }) {
            self.cancel_promotion();
        }
        self.transition(InteractionState::Idle);
    }

    /// Hint for the pointer hovering at `(x, y)`.
    pub fn cursor_hint(&self, x: f32, y: f32) -> CursorHint {
        let Some(square) = self.view.square_at_pixel(x, y) else {
            return CursorHint::NotMovable;
        };

        let movable = match &self.state {
            InteractionState::AwaitingPromotion { .. } => self
                .promotion_menu()
                .iter()
                .any(|(menu_square, _)| *menu_square == square),
            state => {
                self.controller.can_move_from(square)
                    || state
                        .active_square()
                        .is_some_and(|from| self.controller.is_legal_destination(from, square))
            }
        };

        if movable {
            CursorHint::Movable
        } else {
            CursorHint::NotMovable
        }
    }
}

/// Lays the candidates out on the destination file, from the promotion
/// square back toward the mover's own side.
fn menu_layout(
    pending: ChessMove,
    mover: Color,
    candidates: &[PieceKind],
) -> Vec<(Square, PieceKind)> {
    let file = file_of(pending.to) as i8;
    let rank = rank_of(pending.to) as i8;
    let step = -mover.forward();
    candidates
        .iter()
        .enumerate()
        .filter_map(|(index, piece)| {
            try_square(file, rank + step * index as i8).map(|square| (square, *piece))
        })
        .collect()
}
