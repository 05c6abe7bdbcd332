//! Arrows and square highlights drawn with the secondary button.
//!
//! At most one annotation exists per geometric key: a square for highlights,
//! an ordered (from, to) pair for arrows. Writing a different color replaces
//! the old one; writing the same color removes it. Nothing here is consulted
//! for legality.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationColor {
    Yellow,
    Green,
    Red,
    Orange,
    Blue,
    Cyan,
    Magenta,
    Grey,
}

impl AnnotationColor {
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            AnnotationColor::Red => (235, 97, 80),
            AnnotationColor::Orange => (245, 138, 57),
            AnnotationColor::Yellow => (255, 170, 0),
            AnnotationColor::Green => (172, 206, 89),
            AnnotationColor::Cyan => (135, 192, 168),
            AnnotationColor::Blue => (82, 176, 220),
            AnnotationColor::Magenta => (176, 142, 166),
            AnnotationColor::Grey => (175, 166, 145),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AnnotationColor::Yellow => "yellow",
            AnnotationColor::Green => "green",
            AnnotationColor::Red => "red",
            AnnotationColor::Orange => "orange",
            AnnotationColor::Blue => "blue",
            AnnotationColor::Cyan => "cyan",
            AnnotationColor::Magenta => "magenta",
            AnnotationColor::Grey => "grey",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    Arrow {
        from: Square,
        to: Square,
        color: AnnotationColor,
    },
    Highlight {
        square: Square,
        color: AnnotationColor,
    },
}

/// What a toggle did to its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationEdit {
    Added,
    Replaced(AnnotationColor),
    Removed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationStore {
    highlights: BTreeMap<Square, AnnotationColor>,
    arrows: BTreeMap<(Square, Square), AnnotationColor>,
}

fn toggle<K: Ord>(map: &mut BTreeMap<K, AnnotationColor>, key: K, color: AnnotationColor) -> AnnotationEdit {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(color);
            AnnotationEdit::Added
        }
        Entry::Occupied(slot) if *slot.get() == color => {
            slot.remove();
            AnnotationEdit::Removed
        }
        Entry::Occupied(mut slot) => AnnotationEdit::Replaced(slot.insert(color)),
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_highlight(&mut self, square: Square, color: AnnotationColor) -> AnnotationEdit {
        toggle(&mut self.highlights, square, color)
    }

    /// A zero-length arrow is recorded as a highlight of its square.
    pub fn toggle_arrow(&mut self, from: Square, to: Square, color: AnnotationColor) -> AnnotationEdit {
        if from == to {
            return self.toggle_highlight(from, color);
        }
        toggle(&mut self.arrows, (from, to), color)
    }

    pub fn clear_all(&mut self) {
        self.highlights.clear();
        self.arrows.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty() && self.arrows.is_empty()
    }

    pub fn highlight_at(&self, square: Square) -> Option<AnnotationColor> {
        self.highlights.get(&square).copied()
    }

    pub fn arrow_between(&self, from: Square, to: Square) -> Option<AnnotationColor> {
        self.arrows.get(&(from, to)).copied()
    }

    /// Highlights in square order, then arrows in (from, to) order.
    pub fn annotations(&self) -> impl Iterator<Item = Annotation> + '_ {
        let highlights = self
            .highlights
            .iter()
            .map(|(&square, &color)| Annotation::Highlight { square, color });
        let arrows = self
            .arrows
            .iter()
            .map(|(&(from, to), &color)| Annotation::Arrow { from, to, color });
        highlights.chain(arrows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_toggle_twice_restores_absence() {
        let mut store = AnnotationStore::new();
        assert_eq!(store.toggle_highlight(27, AnnotationColor::Red), AnnotationEdit::Added);
        assert_eq!(store.highlight_at(27), Some(AnnotationColor::Red));
        assert_eq!(store.toggle_highlight(27, AnnotationColor::Red), AnnotationEdit::Removed);
        assert_eq!(store.highlight_at(27), None);
        assert!(store.is_empty());
    }

    #[test]
    fn different_color_replaces_instead_of_stacking() {
        let mut store = AnnotationStore::new();
        store.toggle_arrow(12, 28, AnnotationColor::Yellow);
        assert_eq!(
            store.toggle_arrow(12, 28, AnnotationColor::Blue),
            AnnotationEdit::Replaced(AnnotationColor::Yellow)
        );
        assert_eq!(store.arrow_between(12, 28), Some(AnnotationColor::Blue));
        assert_eq!(store.arrow_between(28, 12), None);
        assert_eq!(store.annotations().count(), 1);
    }

    #[test]
    fn removal_only_touches_its_own_key() {
        let mut store = AnnotationStore::new();
        store.toggle_highlight(0, AnnotationColor::Green);
        store.toggle_highlight(9, AnnotationColor::Green);
        store.toggle_highlight(0, AnnotationColor::Green);
        assert_eq!(store.highlight_at(0), None);
        assert_eq!(store.highlight_at(9), Some(AnnotationColor::Green));
    }

    #[test]
    fn zero_length_arrow_becomes_highlight_and_clear_all_empties() {
        let mut store = AnnotationStore::new();
        store.toggle_arrow(27, 27, AnnotationColor::Red);
        store.toggle_arrow(12, 28, AnnotationColor::Green);
        assert_eq!(
            store.annotations().collect::<Vec<_>>(),
            vec![
                Annotation::Highlight {
                    square: 27,
                    color: AnnotationColor::Red
                },
                Annotation::Arrow {
                    from: 12,
                    to: 28,
                    color: AnnotationColor::Green
                },
            ]
        );
        store.clear_all();
        assert!(store.is_empty());
    }
}
