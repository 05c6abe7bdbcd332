//! User-facing board options.
//!
//! Loaded from TOML by the shell; individual options can also be changed by
//! name with `set_option`, mirroring a UCI `setoption name X value Y`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game_state::chess_types::PieceKind;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("invalid settings TOML: {0}")]
    Toml(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid {name} value '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub auto_promotion_enabled: bool,
    pub default_promotion_piece: PieceKind,
    /// Show destination indicators on every selection, not only with shift.
    pub show_legal_moves: bool,
    pub show_coordinates: bool,
    /// Pointer travel that turns a press into a drag.
    pub drag_threshold_px: f32,
    pub square_size_px: f32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            auto_promotion_enabled: false,
            default_promotion_piece: PieceKind::Queen,
            show_legal_moves: false,
            show_coordinates: true,
            drag_threshold_px: 4.0,
            square_size_px: 65.0,
        }
    }
}

impl BoardSettings {
    pub fn from_toml_str(text: &str) -> SettingsResult<Self> {
        let settings: BoardSettings =
            toml::from_str(text).map_err(|err| SettingsError::Toml(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> SettingsResult<String> {
        toml::to_string(self).map_err(|err| SettingsError::Toml(err.to_string()))
    }

    fn validate(&self) -> SettingsResult<()> {
        if !self.default_promotion_piece.is_promotion_target() {
            return Err(SettingsError::InvalidValue {
                name: "default_promotion_piece",
                value: format!("{:?}", self.default_promotion_piece).to_ascii_lowercase(),
            });
        }
        if !(self.drag_threshold_px.is_finite() && self.drag_threshold_px >= 0.0) {
            return Err(SettingsError::InvalidValue {
                name: "drag_threshold_px",
                value: self.drag_threshold_px.to_string(),
            });
        }
        if !(self.square_size_px.is_finite() && self.square_size_px > 0.0) {
            return Err(SettingsError::InvalidValue {
                name: "square_size_px",
                value: self.square_size_px.to_string(),
            });
        }
        Ok(())
    }

    /// Sets one option by name. Names match the TOML keys, ignoring case,
    /// spaces and underscores (`Auto Promotion Enabled` works).
    pub fn set_option(&mut self, name: &str, value: &str) -> SettingsResult<()> {
        let key: String = name
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        let value = value.trim();

        let mut next = self.clone();
        match key.as_str() {
            "autopromotionenabled" | "autopromote" => {
                next.auto_promotion_enabled = parse_bool("auto_promotion_enabled", value)?
            }
            "defaultpromotionpiece" => {
                next.default_promotion_piece = PieceKind::from_name(value)
                    .or_else(|| single_letter_piece(value))
                    .ok_or_else(|| SettingsError::InvalidValue {
                        name: "default_promotion_piece",
                        value: value.to_owned(),
                    })?
            }
            "showlegalmoves" => next.show_legal_moves = parse_bool("show_legal_moves", value)?,
            "showcoordinates" => next.show_coordinates = parse_bool("show_coordinates", value)?,
            "dragthresholdpx" => next.drag_threshold_px = parse_f32("drag_threshold_px", value)?,
            "squaresizepx" => next.square_size_px = parse_f32("square_size_px", value)?,
            _ => return Err(SettingsError::UnknownOption(name.to_owned())),
        }

        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn single_letter_piece(value: &str) -> Option<PieceKind> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => PieceKind::from_letter(letter),
        _ => None,
    }
}

fn parse_bool(name: &'static str, value: &str) -> SettingsResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            name,
            value: value.to_owned(),
        }),
    }
}

fn parse_f32(name: &'static str, value: &str) -> SettingsResult<f32> {
    value.parse::<f32>().map_err(|_| SettingsError::InvalidValue {
        name,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings =
            BoardSettings::from_toml_str("auto_promotion_enabled = true\ndefault_promotion_piece = \"knight\"\n")
                .expect("valid TOML");
        assert!(settings.auto_promotion_enabled);
        assert_eq!(settings.default_promotion_piece, PieceKind::Knight);
        assert!(settings.show_coordinates);
        assert_eq!(settings.square_size_px, 65.0);
    }

    #[test]
    fn rejects_non_promotion_default_and_bad_toml() {
        assert!(matches!(
            BoardSettings::from_toml_str("default_promotion_piece = \"king\""),
            Err(SettingsError::InvalidValue { name: "default_promotion_piece", .. })
        ));
        assert!(matches!(
            BoardSettings::from_toml_str("show_coordinates = 3"),
            Err(SettingsError::Toml(_))
        ));
    }

    #[test]
    fn toml_text_round_trips() {
        let mut settings = BoardSettings::default();
        settings.show_legal_moves = true;
        let text = settings.to_toml_string().expect("serializable");
        assert_eq!(BoardSettings::from_toml_str(&text), Ok(settings));
    }

    #[test]
    fn set_option_by_display_name() {
        let mut settings = BoardSettings::default();
        settings
            .set_option("Auto Promotion Enabled", "on")
            .expect("known option");
        settings
            .set_option("default_promotion_piece", "R")
            .expect("rook letter");
        assert!(settings.auto_promotion_enabled);
        assert_eq!(settings.default_promotion_piece, PieceKind::Rook);

        assert_eq!(
            settings.set_option("Volume", "3"),
            Err(SettingsError::UnknownOption("Volume".to_owned()))
        );
        assert!(settings.set_option("square_size_px", "-1").is_err());
        assert_eq!(settings.square_size_px, 65.0);
        assert!(settings.set_option("default_promotion_piece", "pawn").is_err());
        assert_eq!(settings.default_promotion_piece, PieceKind::Rook);
    }
}
