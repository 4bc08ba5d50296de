//! Game state and core types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::backend::EntityId;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at rest, next pointer-down serves
    #[default]
    NotRunning,
    /// Ball in play
    Running,
    /// Simulation paused, waiting for the player to acknowledge
    GameOver,
}

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputState {
    #[default]
    Idle,
    /// The active gesture started on the paddle
    DraggingPaddle,
}

/// Serve direction, picked by a fair coin flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServeDirection {
    /// Up and to the right
    Forward,
    /// Down and to the left
    Backward,
}

impl ServeDirection {
    /// 0 serves forward, anything else backward
    pub fn from_flip(flip: u32) -> Self {
        if flip == 0 {
            ServeDirection::Forward
        } else {
            ServeDirection::Backward
        }
    }

    /// Diagonal impulse with the given per-axis magnitude
    pub fn impulse(self, magnitude: f32) -> Vec2 {
        match self {
            ServeDirection::Forward => Vec2::new(magnitude, magnitude),
            ServeDirection::Backward => Vec2::new(-magnitude, -magnitude),
        }
    }
}

/// Seeded coin used for serves
#[derive(Debug, Clone)]
pub struct ServeCoin {
    rng: Pcg32,
}

impl ServeCoin {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn flip(&mut self) -> ServeDirection {
        ServeDirection::from_flip(self.rng.random_range(0..2))
    }
}

/// Brick colour, alternating by column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Blue,
    Red,
}

impl BrickColor {
    pub fn for_column(column: usize) -> Self {
        if column % 2 == 0 {
            BrickColor::Blue
        } else {
            BrickColor::Red
        }
    }
}

/// A live brick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub entity: EntityId,
    pub column: usize,
    pub pos: Vec2,
    pub size: Vec2,
    pub color: BrickColor,
}

/// The player's paddle. Only `x` ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub entity: EntityId,
    pub x: f32,
    pub y: f32,
    pub size: Vec2,
}

impl Paddle {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Paddle x after shifting by `dx`, or None if the footprint would touch
    /// or leave the playfield. Never partially applied.
    pub fn shifted(&self, dx: f32, half_playfield_width: f32) -> Option<f32> {
        let x = self.x + dx;
        let hw = self.half_width();
        if x + hw < half_playfield_width && x - hw > -half_playfield_width {
            Some(x)
        } else {
            None
        }
    }
}

/// Events for the host (HUD, audio, modal presentation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Served { impulse: Vec2 },
    BrickDestroyed { column: usize },
    /// Present the "Game Over" modal; acknowledge to reset
    GameOver,
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle(x: f32, width: f32) -> Paddle {
        Paddle {
            entity: EntityId(1),
            x,
            y: -500.0,
            size: Vec2::new(width, 20.0),
        }
    }

    #[test]
    fn test_serve_impulse() {
        assert_eq!(ServeDirection::from_flip(0).impulse(8.0), Vec2::new(8.0, 8.0));
        assert_eq!(ServeDirection::from_flip(1).impulse(8.0), Vec2::new(-8.0, -8.0));
    }

    #[test]
    fn test_coin_is_deterministic_and_two_sided() {
        let mut a = ServeCoin::new(7);
        let mut b = ServeCoin::new(7);
        let flips_a: Vec<_> = (0..64).map(|_| a.flip()).collect();
        let flips_b: Vec<_> = (0..64).map(|_| b.flip()).collect();
        assert_eq!(flips_a, flips_b);
        assert!(flips_a.contains(&ServeDirection::Forward));
        assert!(flips_a.contains(&ServeDirection::Backward));
    }

    #[test]
    fn test_brick_colors_alternate() {
        assert_eq!(BrickColor::for_column(0), BrickColor::Blue);
        assert_eq!(BrickColor::for_column(1), BrickColor::Red);
        assert_eq!(BrickColor::for_column(4), BrickColor::Blue);
    }

    #[test]
    fn test_paddle_shift_is_strict() {
        let p = paddle(0.0, 100.0);
        assert_eq!(p.shifted(10.0, 150.0), Some(10.0));
        // Exactly touching the right edge is rejected
        assert_eq!(p.shifted(100.0, 150.0), None);
        assert_eq!(p.shifted(-100.0, 150.0), None);
        assert_eq!(p.shifted(99.0, 150.0), Some(99.0));
    }
}
