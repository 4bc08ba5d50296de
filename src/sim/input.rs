//! Pointer input events (single pointer, scene coordinates)

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { at: Vec2 },
    /// `previous` is the prior sample of the same gesture
    Move { at: Vec2, previous: Vec2 },
    Up { at: Vec2 },
}
