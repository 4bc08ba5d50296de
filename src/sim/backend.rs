//! Physics/render backend seam
//!
//! The controller never touches engine internals. It describes bodies,
//! tags them, nudges them, and reacts to collision-begin contacts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Opaque handle to an entity (node + optional physics body) in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Collider shape, in the entity's local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle centred on the entity
    Rect { size: Vec2 },
    /// Hollow rectangle boundary; dynamic bodies are kept inside
    EdgeLoop { size: Vec2 },
    /// Single segment
    Edge { from: Vec2, to: Vec2 },
}

/// Surface and mass properties of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub allows_rotation: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            mass: 1.0,
            restitution: 0.2,
            friction: 0.2,
            linear_damping: 0.1,
            angular_damping: 0.1,
            allows_rotation: true,
        }
    }
}

impl Material {
    /// Perfectly elastic, frictionless, non-rotating
    pub fn elastic(mass: f32) -> Self {
        Self {
            mass,
            restitution: 1.0,
            friction: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            allows_rotation: false,
        }
    }
}

/// Everything needed to create or attach a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    pub shape: Shape,
    pub position: Vec2,
    /// Static bodies never move under simulation
    pub dynamic: bool,
    pub material: Material,
}

impl BodyDesc {
    pub fn fixed(shape: Shape, position: Vec2) -> Self {
        Self {
            shape,
            position,
            dynamic: false,
            material: Material::default(),
        }
    }

    pub fn dynamic(shape: Shape, position: Vec2, material: Material) -> Self {
        Self {
            shape,
            position,
            dynamic: true,
            material,
        }
    }
}

/// One participant of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub entity: EntityId,
    pub category: Category,
}

/// A collision-begin event; the order of `a` and `b` is unspecified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
}

/// Receiver of collision-begin events
pub trait CollisionObserver {
    fn on_contact_begin(&mut self, a: ContactBody, b: ContactBody);
}

/// Minimal surface the game needs from a physics/render engine
pub trait PhysicsBackend {
    /// Create a detached entity with a body; it is not simulated until added
    fn create_body(&mut self, desc: BodyDesc) -> EntityId;
    /// Attach a body to an existing entity. Returns false for unknown entities.
    fn attach_body(&mut self, entity: EntityId, desc: BodyDesc) -> bool;
    fn set_collision_tags(&mut self, entity: EntityId, category: Category, contact_mask: Category);

    fn apply_impulse(&mut self, entity: EntityId, impulse: Vec2);
    fn set_velocity(&mut self, entity: EntityId, velocity: Vec2);
    fn set_position(&mut self, entity: EntityId, position: Vec2);

    fn add_entity(&mut self, entity: EntityId);
    /// Remove from the world. Returns false if it was not in the world.
    fn remove_entity(&mut self, entity: EntityId) -> bool;

    fn set_gravity(&mut self, gravity: Vec2);
    fn set_paused(&mut self, paused: bool);
    fn is_paused(&self) -> bool;

    /// Topmost entity under a point
    fn entity_at(&self, point: Vec2) -> Option<EntityId>;

    fn position(&self, entity: EntityId) -> Option<Vec2>;
    fn velocity(&self, entity: EntityId) -> Option<Vec2>;
    /// Node footprint
    fn size(&self, entity: EntityId) -> Option<Vec2>;
    /// True if the entity is currently in the world
    fn contains(&self, entity: EntityId) -> bool;

    /// Advance the simulation; returns collision-begin contacts. No-op while paused.
    fn step(&mut self, dt: f32) -> Vec<Contact>;
}
