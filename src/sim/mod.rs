//! Game simulation module
//!
//! The controller holds the rules and talks to physics only through the
//! `PhysicsBackend` seam:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod backend;
pub mod category;
pub mod controller;
pub mod input;
pub mod layout;
pub mod state;
pub mod world;

pub use backend::{
    BodyDesc, CollisionObserver, Contact, ContactBody, EntityId, Material, PhysicsBackend, Shape,
};
pub use category::Category;
pub use controller::{GameController, SceneEntities};
pub use input::PointerEvent;
pub use layout::{BrickSlot, brick_row};
pub use state::{
    Brick, BrickColor, GameEvent, GamePhase, InputState, Paddle, ServeCoin, ServeDirection,
};
pub use world::World;
