//! Error types
//!
//! Configuration problems are fatal and surface at construction time.
//! Runtime input edge cases are never errors.

use thiserror::Error;

/// Fatal misconfiguration detected while setting up the scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A required scene entity (paddle or ball) was not supplied or is unknown to the backend
    #[error("required entity `{0}` is missing from the scene")]
    MissingEntity(&'static str),
    /// Paddle and ball were given the same handle
    #[error("paddle and ball must be distinct entities")]
    AliasedEntities,
    #[error("playfield must have positive size, got {width}x{height}")]
    InvalidPlayfield { width: f32, height: f32 },
    #[error(
        "brick count must be between 1 and {max}, got {0}",
        max = crate::consts::MAX_BRICK_COUNT
    )]
    InvalidBrickCount(usize),
    #[error("ball mass must be positive, got {0}")]
    InvalidMass(f32),
    #[error("`{field}` must be finite and in range, got {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// Failure while loading a configuration file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}
