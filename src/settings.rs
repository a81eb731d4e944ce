//! Game settings
//!
//! Court geometry, tuning constants and display toggles. Loaded from JSON
//! (missing fields fall back to the defaults) and validated before any
//! entity is built from them.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Court ===
    /// Logical court width (pixels)
    pub width: f64,
    /// Logical court height (pixels)
    pub height: f64,
    /// Thickness of the top and bottom walls
    pub wall_width: f64,

    // === Paddles ===
    pub paddle_width: f64,
    pub paddle_height: f64,
    /// Seconds for a paddle to cross the court vertically
    pub paddle_speed: f64,

    // === Ball ===
    pub ball_radius: f64,
    /// Seconds for the ball to cross the court horizontally at serve speed
    pub ball_speed: f64,
    /// Acceleration along the direction of travel (pixels/s²)
    pub ball_accel: f64,

    // === Rules ===
    /// Score that ends the match
    pub win_score: u32,

    // === Loop driver ===
    /// Target ticks per second
    pub fps: u32,
    /// Collect and draw frame statistics
    pub stats: bool,

    // === Toggles ===
    pub show_footprints: bool,
    pub show_predictions: bool,
    pub play_sounds: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            wall_width: 12.0,

            paddle_width: 12.0,
            paddle_height: 60.0,
            paddle_speed: 2.0,

            ball_radius: 5.0,
            ball_speed: 4.0,
            ball_accel: 8.0,

            win_score: 9,

            fps: 60,
            stats: true,

            show_footprints: false,
            show_predictions: false,
            play_sounds: true,
        }
    }
}

/// Why a settings file or value was rejected
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field that must be a positive, finite number was not
    NotPositive(&'static str),
    /// The walls leave no room for the ball to travel
    CourtTooSmall,
    /// A paddle does not fit inside the court
    PaddleTooLarge,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "invalid settings JSON: {e}"),
            SettingsError::NotPositive(field) => {
                write!(f, "`{field}` must be a positive number")
            }
            SettingsError::CourtTooSmall => {
                write!(f, "court is too small for its walls and the ball")
            }
            SettingsError::PaddleTooLarge => write!(f, "paddle does not fit inside the court"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

fn positive(value: f64, field: &'static str) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NotPositive(field))
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the geometry describes a playable court
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive(self.width, "width")?;
        positive(self.height, "height")?;
        positive(self.paddle_width, "paddle_width")?;
        positive(self.paddle_height, "paddle_height")?;
        positive(self.paddle_speed, "paddle_speed")?;
        positive(self.ball_radius, "ball_radius")?;
        positive(self.ball_speed, "ball_speed")?;
        if !(self.wall_width.is_finite() && self.wall_width >= 0.0) {
            return Err(SettingsError::NotPositive("wall_width"));
        }
        if !(self.ball_accel.is_finite() && self.ball_accel >= 0.0) {
            return Err(SettingsError::NotPositive("ball_accel"));
        }
        if self.win_score == 0 {
            return Err(SettingsError::NotPositive("win_score"));
        }
        if self.fps == 0 {
            return Err(SettingsError::NotPositive("fps"));
        }

        if self.play_height() <= 2.0 * self.ball_radius || self.width <= 2.0 * self.ball_radius {
            return Err(SettingsError::CourtTooSmall);
        }
        if self.paddle_height > self.play_height() || 2.0 * self.paddle_width >= self.width {
            return Err(SettingsError::PaddleTooLarge);
        }
        Ok(())
    }

    /// Vertical space between the walls
    pub fn play_height(&self) -> f64 {
        self.height - 2.0 * self.wall_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "show_footprints": true, "win_score": 5 }"#)
            .expect("valid settings");
        assert!(settings.show_footprints);
        assert_eq!(settings.win_score, 5);
        assert_eq!(settings.width, 640.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            play_sounds: false,
            ..Default::default()
        };
        let json = settings.to_json().expect("serializes");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Settings::from_json("{ width: }"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        let settings = Settings {
            width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotPositive("width"))
        ));

        let settings = Settings {
            ball_speed: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotPositive("ball_speed"))
        ));
    }

    #[test]
    fn test_rejects_paddle_taller_than_court() {
        let settings = Settings {
            paddle_height: 470.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::PaddleTooLarge)
        ));
    }

    #[test]
    fn test_rejects_walls_that_swallow_the_court() {
        let settings = Settings {
            wall_width: 236.0,
            paddle_height: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::CourtTooSmall)
        ));
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let msg = SettingsError::NotPositive("paddle_speed").to_string();
        assert!(msg.contains("paddle_speed"));
    }
}
