//! Game configuration
//!
//! Loaded from a JSON file on native targets; every field has a default so
//! partial files are fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigurationError, SettingsError};

/// Tunable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    /// Playfield width (scene units, centre origin)
    pub playfield_width: f32,
    /// Playfield height (scene units, centre origin)
    pub playfield_height: f32,

    // === Bricks ===
    /// Number of bricks in the row
    pub brick_count: usize,
    pub brick_height: f32,
    /// Offset of the row centre below the top edge
    pub brick_top_offset: f32,
    /// Rebuild the brick row after a game-over reset
    pub rebuild_bricks_on_reset: bool,

    // === Ball ===
    /// Per-axis magnitude of the diagonal serve impulse
    pub serve_impulse: f32,
    pub ball_mass: f32,

    /// Seed for the serve coin flip
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            brick_count: BRICK_COUNT,
            brick_height: BRICK_HEIGHT,
            brick_top_offset: BRICK_TOP_OFFSET,
            rebuild_bricks_on_reset: false,

            serve_impulse: SERVE_IMPULSE,
            ball_mass: BALL_MASS,

            seed: 0x5EED,
        }
    }
}

impl GameConfig {
    /// Config with a custom playfield size, everything else default
    pub fn with_playfield(width: f32, height: f32) -> Self {
        Self {
            playfield_width: width,
            playfield_height: height,
            ..Self::default()
        }
    }

    /// Half the playfield width
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.playfield_width / 2.0
    }

    /// Half the playfield height
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.playfield_height / 2.0
    }

    /// Reject values the game cannot be set up with
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let (width, height) = (self.playfield_width, self.playfield_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigurationError::InvalidPlayfield { width, height });
        }
        if self.brick_count == 0 || self.brick_count > MAX_BRICK_COUNT {
            return Err(ConfigurationError::InvalidBrickCount(self.brick_count));
        }
        if !(self.ball_mass.is_finite() && self.ball_mass > 0.0) {
            return Err(ConfigurationError::InvalidMass(self.ball_mass));
        }

        // Must be finite and positive
        for (field, value) in [
            ("brick_height", self.brick_height),
            ("serve_impulse", self.serve_impulse),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::InvalidValue { field, value });
            }
        }
        // Row must sit inside the playfield
        let offset = self.brick_top_offset;
        if !(offset.is_finite() && offset >= 0.0 && offset <= height) {
            return Err(ConfigurationError::InvalidValue {
                field: "brick_top_offset",
                value: offset,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.brick_count, 6);
        assert!(!config.rebuild_bricks_on_reset);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "playfield_width": 300.0 }"#).unwrap();
        assert_eq!(config.playfield_width, 300.0);
        assert_eq!(config.playfield_height, PLAYFIELD_HEIGHT);
        assert_eq!(config.serve_impulse, SERVE_IMPULSE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::from_json(r#"{ "brick_count": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid(ConfigurationError::InvalidBrickCount(0))
        ));

        let config = GameConfig::with_playfield(0.0, 100.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidPlayfield { .. })
        ));

        let config = GameConfig {
            ball_mass: 0.0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigurationError::InvalidMass(0.0)));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let config = GameConfig::with_playfield(f32::INFINITY, 600.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidPlayfield { .. })
        ));

        let config = GameConfig::with_playfield(300.0, f32::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidPlayfield { .. })
        ));

        let err = GameConfig::from_json(r#"{ "brick_count": 1000000 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid(ConfigurationError::InvalidBrickCount(1_000_000))
        ));

        let config = GameConfig {
            brick_height: -25.0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidValue {
                field: "brick_height",
                value: -25.0
            })
        );

        let config = GameConfig {
            serve_impulse: -8.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidValue {
                field: "serve_impulse",
                ..
            })
        ));

        let config = GameConfig {
            ball_mass: f32::INFINITY,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidMass(_))
        ));

        let config = GameConfig {
            brick_top_offset: 5000.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidValue {
                field: "brick_top_offset",
                ..
            })
        ));

        let config = GameConfig {
            brick_count: MAX_BRICK_COUNT,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GameConfig::load("/nonexistent/brick-pong.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig {
            rebuild_bricks_on_reset: true,
            seed: 42,
            ..GameConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
