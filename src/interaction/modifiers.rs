//! Held modifier keys and the annotation color they select.

use bitflags::bitflags;

use crate::annotations::annotation_store::AnnotationColor;

bitflags! {
    /// Modifier keys held while a pointer or key event arrives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b001;
        const SHIFT = 0b010;
        const ALT   = 0b100;
    }
}

impl Modifiers {
    /// Parses `ctrl+shift`, `alt` or `none`. Names are case-insensitive;
    /// `control` is accepted for `ctrl`.
    pub fn parse_combo(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("none") {
            return Some(Modifiers::empty());
        }
        let mut mods = Modifiers::empty();
        for name in text.split('+') {
            mods |= match name.trim().to_ascii_lowercase().as_str() {
                "ctrl" | "control" => Modifiers::CTRL,
                "shift" => Modifiers::SHIFT,
                "alt" => Modifiers::ALT,
                _ => return None,
            };
        }
        Some(mods)
    }
}

/// Fixed color table for annotation gestures. Sampled once when a gesture
/// starts. Arrows and square highlights read the same table, so a plain
/// right-click highlight is yellow just like a plain arrow.
pub const fn color_from_modifiers(mods: Modifiers) -> AnnotationColor {
    let ctrl = mods.contains(Modifiers::CTRL);
    let shift = mods.contains(Modifiers::SHIFT);
    let alt = mods.contains(Modifiers::ALT);
    match (ctrl, shift, alt) {
        (false, false, false) => AnnotationColor::Yellow,
        (false, true, false) => AnnotationColor::Green,
        (true, false, false) => AnnotationColor::Red,
        (true, true, false) => AnnotationColor::Orange,
        (false, false, true) => AnnotationColor::Blue,
        (false, true, true) => AnnotationColor::Cyan,
        (true, false, true) => AnnotationColor::Magenta,
        (true, true, true) => AnnotationColor::Grey,
    }
}
