//! Headless reference backend
//!
//! Just enough physics to run the game without a host engine:
//! - Axis-aligned boxes only (edges use their bounding box)
//! - Explicit Euler integration, no rotation
//! - Dynamic bodies are resolved against every other body, which is treated as immovable
//! - Stable iteration order (by entity ID)
//! - Removing a body-only entity destroys it; named sprite nodes are kept and can be re-added

use std::collections::BTreeSet;

use glam::Vec2;

use super::backend::{BodyDesc, Contact, ContactBody, EntityId, Material, PhysicsBackend, Shape};
use super::category::Category;

/// Default gravity before the game turns it off
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.8);

/// Separation still counted as touching
pub const CONTACT_SLOP: f32 = 0.01;

#[derive(Debug, Clone)]
struct Body {
    shape: Shape,
    dynamic: bool,
    material: Material,
    category: Category,
    contact_mask: Category,
}

#[derive(Debug, Clone)]
struct Node {
    id: EntityId,
    name: Option<String>,
    pos: Vec2,
    vel: Vec2,
    size: Vec2,
    body: Option<Body>,
    in_world: bool,
}

/// Penetration of a dynamic box into another body
#[derive(Debug, Clone, Copy)]
struct Hit {
    /// Points from the other body toward the dynamic one
    normal: Vec2,
    penetration: f32,
}

/// Minimal scene graph plus rigid-body stepping
#[derive(Debug, Clone)]
pub struct World {
    /// Sorted by id
    nodes: Vec<Node>,
    gravity: Vec2,
    paused: bool,
    /// Pairs in contact after the last step (lower id first)
    touching: BTreeSet<(EntityId, EntityId)>,
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            gravity: DEFAULT_GRAVITY,
            paused: false,
            touching: BTreeSet::new(),
            next_id: 1,
        }
    }

    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    fn node(&self, entity: EntityId) -> Option<&Node> {
        self.nodes
            .binary_search_by_key(&entity, |n| n.id)
            .ok()
            .map(|i| &self.nodes[i])
    }

    fn node_mut(&mut self, entity: EntityId) -> Option<&mut Node> {
        match self.nodes.binary_search_by_key(&entity, |n| n.id) {
            Ok(i) => Some(&mut self.nodes[i]),
            Err(_) => None,
        }
    }

    /// Add a named sprite node (no body) directly to the world
    pub fn spawn_node(&mut self, name: &str, pos: Vec2, size: Vec2) -> EntityId {
        let id = self.alloc_id();
        self.nodes.push(Node {
            id,
            name: Some(name.to_string()),
            pos,
            vel: Vec2::ZERO,
            size,
            body: None,
            in_world: true,
        });
        id
    }

    /// Host-side lookup of a node by name
    pub fn find_by_name(&self, name: &str) -> Option<EntityId> {
        self.nodes
            .iter()
            .find(|n| n.in_world && n.name.as_deref() == Some(name))
            .map(|n| n.id)
    }

    /// In-world entities whose body carries the given category
    pub fn entities_with_category(&self, category: Category) -> Vec<EntityId> {
        self.nodes
            .iter()
            .filter(|n| n.in_world)
            .filter(|n| n.body.as_ref().is_some_and(|b| b.category.intersects(category)))
            .map(|n| n.id)
            .collect()
    }

    /// Live nodes, in or out of the world
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    fn integrate(&mut self, dt: f32) {
        let gravity = self.gravity;
        for node in self.nodes.iter_mut().filter(|n| n.in_world) {
            let Some(body) = node.body.as_ref().filter(|b| b.dynamic) else {
                continue;
            };
            node.vel += gravity * dt;
            node.vel *= (1.0 - body.material.linear_damping * dt).max(0.0);
            node.pos += node.vel * dt;
        }
    }

    fn resolve(&mut self) -> BTreeSet<(EntityId, EntityId)> {
        let mut touching = BTreeSet::new();

        let dynamic_ids: Vec<EntityId> = self
            .nodes
            .iter()
            .filter(|n| n.in_world && n.body.as_ref().is_some_and(|b| b.dynamic))
            .map(|n| n.id)
            .collect();

        for id in dynamic_ids {
            let others: Vec<(EntityId, Vec2, Body)> = self
                .nodes
                .iter()
                .filter(|n| n.in_world && n.id != id)
                .filter_map(|n| n.body.clone().map(|b| (n.id, n.pos, b)))
                .collect();

            let Some(node) = self.node_mut(id) else {
                continue;
            };
            let Some(body) = node.body.clone() else {
                continue;
            };
            let Shape::Rect { size } = body.shape else {
                continue;
            };
            let half = size / 2.0;

            for (other_id, other_pos, other) in &others {
                let Some(hit) = overlap(node.pos, half, *other_pos, &other.shape) else {
                    continue;
                };

                node.pos += hit.normal * hit.penetration;
                let approach = node.vel.dot(hit.normal);
                if approach < 0.0 {
                    let e = body.material.restitution.max(other.material.restitution);
                    node.vel -= (1.0 + e) * approach * hit.normal;
                }

                touching.insert(ordered(id, *other_id));
            }
        }

        touching
    }

    fn contact_body(&self, entity: EntityId) -> Option<(ContactBody, Category)> {
        let body = self.node(entity)?.body.as_ref()?;
        Some((
            ContactBody {
                entity,
                category: body.category,
            },
            body.contact_mask,
        ))
    }
}

fn ordered(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Box vs box overlap, including touching within the slop
fn box_overlap(pos: Vec2, half: Vec2, other_pos: Vec2, other_half: Vec2) -> Option<Hit> {
    let d = pos - other_pos;
    let ox = half.x + other_half.x - d.x.abs();
    let oy = half.y + other_half.y - d.y.abs();
    if ox < -CONTACT_SLOP || oy < -CONTACT_SLOP {
        return None;
    }

    let hit = if ox < oy {
        Hit {
            normal: Vec2::new(if d.x >= 0.0 { 1.0 } else { -1.0 }, 0.0),
            penetration: ox.max(0.0),
        }
    } else {
        Hit {
            normal: Vec2::new(0.0, if d.y >= 0.0 { 1.0 } else { -1.0 }),
            penetration: oy.max(0.0),
        }
    };
    Some(hit)
}

/// Deepest boundary violation of a box kept inside a loop
fn loop_overlap(pos: Vec2, half: Vec2, loop_pos: Vec2, loop_half: Vec2) -> Option<Hit> {
    let min = loop_pos - loop_half;
    let max = loop_pos + loop_half;

    let candidates = [
        (Vec2::X, min.x - (pos.x - half.x)),
        (Vec2::NEG_X, (pos.x + half.x) - max.x),
        (Vec2::Y, min.y - (pos.y - half.y)),
        (Vec2::NEG_Y, (pos.y + half.y) - max.y),
    ];

    candidates
        .into_iter()
        .filter(|(_, pen)| *pen >= -CONTACT_SLOP)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(normal, penetration)| Hit {
            normal,
            penetration: penetration.max(0.0),
        })
}

fn overlap(pos: Vec2, half: Vec2, other_pos: Vec2, other: &Shape) -> Option<Hit> {
    match *other {
        Shape::Rect { size } => box_overlap(pos, half, other_pos, size / 2.0),
        Shape::EdgeLoop { size } => loop_overlap(pos, half, other_pos, size / 2.0),
        Shape::Edge { from, to } => {
            let centre = other_pos + (from + to) / 2.0;
            box_overlap(pos, half, centre, (to - from).abs() / 2.0)
        }
    }
}

impl PhysicsBackend for World {
    fn create_body(&mut self, desc: BodyDesc) -> EntityId {
        let id = self.alloc_id();
        let size = match desc.shape {
            Shape::Rect { size } => size,
            _ => Vec2::ZERO,
        };
        self.nodes.push(Node {
            id,
            name: None,
            pos: desc.position,
            vel: Vec2::ZERO,
            size,
            body: Some(Body {
                shape: desc.shape,
                dynamic: desc.dynamic,
                material: desc.material,
                category: Category::NONE,
                contact_mask: Category::NONE,
            }),
            in_world: false,
        });
        id
    }

    fn attach_body(&mut self, entity: EntityId, desc: BodyDesc) -> bool {
        let Some(node) = self.node_mut(entity) else {
            return false;
        };
        node.pos = desc.position;
        node.vel = Vec2::ZERO;
        node.body = Some(Body {
            shape: desc.shape,
            dynamic: desc.dynamic,
            material: desc.material,
            category: Category::NONE,
            contact_mask: Category::NONE,
        });
        true
    }

    fn set_collision_tags(&mut self, entity: EntityId, category: Category, contact_mask: Category) {
        if let Some(body) = self.node_mut(entity).and_then(|n| n.body.as_mut()) {
            body.category = category;
            body.contact_mask = contact_mask;
        }
    }

    fn apply_impulse(&mut self, entity: EntityId, impulse: Vec2) {
        if let Some(node) = self.node_mut(entity) {
            if let Some(body) = node.body.as_ref().filter(|b| b.dynamic) {
                node.vel += impulse / body.material.mass;
            }
        }
    }

    fn set_velocity(&mut self, entity: EntityId, velocity: Vec2) {
        if let Some(node) = self.node_mut(entity) {
            node.vel = velocity;
        }
    }

    fn set_position(&mut self, entity: EntityId, position: Vec2) {
        if let Some(node) = self.node_mut(entity) {
            node.pos = position;
        }
    }

    fn add_entity(&mut self, entity: EntityId) {
        if let Some(node) = self.node_mut(entity) {
            node.in_world = true;
        }
    }

    fn remove_entity(&mut self, entity: EntityId) -> bool {
        let Ok(index) = self.nodes.binary_search_by_key(&entity, |n| n.id) else {
            return false;
        };
        let was_in_world = self.nodes[index].in_world;
        if self.nodes[index].name.is_some() {
            self.nodes[index].in_world = false;
        } else {
            self.nodes.remove(index);
        }
        self.touching.retain(|(a, b)| *a != entity && *b != entity);
        was_in_world
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn entity_at(&self, point: Vec2) -> Option<EntityId> {
        self.nodes
            .iter()
            .rev()
            .filter(|n| n.in_world && n.size != Vec2::ZERO)
            .find(|n| {
                let d = (point - n.pos).abs();
                d.x <= n.size.x / 2.0 && d.y <= n.size.y / 2.0
            })
            .map(|n| n.id)
    }

    fn position(&self, entity: EntityId) -> Option<Vec2> {
        self.node(entity).map(|n| n.pos)
    }

    fn velocity(&self, entity: EntityId) -> Option<Vec2> {
        self.node(entity).map(|n| n.vel)
    }

    fn size(&self, entity: EntityId) -> Option<Vec2> {
        self.node(entity).map(|n| n.size)
    }

    fn contains(&self, entity: EntityId) -> bool {
        self.node(entity).is_some_and(|n| n.in_world)
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        if self.paused {
            return Vec::new();
        }

        self.integrate(dt);
        let touching = self.resolve();

        let mut contacts = Vec::new();
        for &(a, b) in touching.difference(&self.touching) {
            let (Some((body_a, mask_a)), Some((body_b, mask_b))) =
                (self.contact_body(a), self.contact_body(b))
            else {
                continue;
            };
            if mask_a.intersects(body_b.category) || mask_b.intersects(body_a.category) {
                contacts.push(Contact { a: body_a, b: body_b });
            }
        }

        self.touching = touching;
        contacts
    }
}
