//! Brick Pong - a single-screen paddle/ball/brick game
//!
//! Core modules:
//! - `sim`: Game controller, backend seam, and a headless reference world
//! - `settings`: Data-driven game configuration
//! - `error`: Configuration and settings errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigurationError, SettingsError};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for the headless world (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Default playfield (host scene) dimensions, centre origin
    pub const PLAYFIELD_WIDTH: f32 = 750.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1334.0;

    /// Bricks are laid out in a single row
    pub const BRICK_COUNT: usize = 6;
    /// Upper bound accepted from config files
    pub const MAX_BRICK_COUNT: usize = 64;
    pub const BRICK_HEIGHT: f32 = 25.0;
    /// Distance from the top edge down to the brick row centre
    pub const BRICK_TOP_OFFSET: f32 = 100.0;

    /// Diagonal serve impulse per axis (scene units)
    pub const SERVE_IMPULSE: f32 = 8.0;

    /// Ball mass; an 8-unit impulse gives 400 units/s
    pub const BALL_MASS: f32 = 0.02;
}
