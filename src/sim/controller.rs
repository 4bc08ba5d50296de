//! Game controller
//!
//! Owns the rules: serving, paddle dragging, brick destruction, game over
//! and reset. Everything physical is delegated to a [`PhysicsBackend`].

use glam::Vec2;

use super::backend::{
    BodyDesc, CollisionObserver, ContactBody, EntityId, Material, PhysicsBackend, Shape,
};
use super::category::Category;
use super::input::PointerEvent;
use super::layout::brick_row;
use super::state::{Brick, GameEvent, GamePhase, InputState, Paddle, ServeCoin};
use crate::error::ConfigurationError;
use crate::settings::GameConfig;

/// Host-supplied handles for the pre-existing scene nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneEntities {
    pub paddle: Option<EntityId>,
    pub ball: Option<EntityId>,
}

/// The single game-rules component
#[derive(Debug)]
pub struct GameController<B: PhysicsBackend> {
    backend: B,
    config: GameConfig,
    phase: GamePhase,
    input: InputState,
    /// Never incremented; kept for the HUD
    score: u64,
    paddle: Paddle,
    ball: EntityId,
    walls: EntityId,
    bottom: EntityId,
    /// Sorted by column
    bricks: Vec<Brick>,
    coin: ServeCoin,
    events: Vec<GameEvent>,
}

/// Look up a required entity, failing fast if it is absent
fn require<B: PhysicsBackend>(
    backend: &B,
    entity: Option<EntityId>,
    name: &'static str,
) -> Result<EntityId, ConfigurationError> {
    match entity {
        Some(id) if backend.contains(id) => Ok(id),
        _ => Err(ConfigurationError::MissingEntity(name)),
    }
}

impl<B: PhysicsBackend> GameController<B> {
    /// Set up the scene: bodies, boundaries, brick row, zero gravity
    pub fn new(
        mut backend: B,
        scene: SceneEntities,
        config: GameConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let paddle_id = require(&backend, scene.paddle, "paddle")?;
        let ball = require(&backend, scene.ball, "ball")?;
        if paddle_id == ball {
            return Err(ConfigurationError::AliasedEntities);
        }

        let paddle_pos = backend
            .position(paddle_id)
            .ok_or(ConfigurationError::MissingEntity("paddle"))?;
        let paddle_size = backend
            .size(paddle_id)
            .ok_or(ConfigurationError::MissingEntity("paddle"))?;
        let ball_pos = backend
            .position(ball)
            .ok_or(ConfigurationError::MissingEntity("ball"))?;
        let ball_size = backend
            .size(ball)
            .ok_or(ConfigurationError::MissingEntity("ball"))?;

        // Paddle: static box
        backend.attach_body(
            paddle_id,
            BodyDesc::fixed(Shape::Rect { size: paddle_size }, paddle_pos),
        );

        // Ball: elastic, frictionless, undamped, no rotation
        backend.attach_body(
            ball,
            BodyDesc::dynamic(
                Shape::Rect { size: ball_size },
                ball_pos,
                Material::elastic(config.ball_mass),
            ),
        );
        backend.set_collision_tags(ball, Category::BALL, Category::BOTTOM | Category::BRICK);

        // Perimeter for left/right/top bounces
        let playfield = Vec2::new(config.playfield_width, config.playfield_height);
        let walls =
            backend.create_body(BodyDesc::fixed(Shape::EdgeLoop { size: playfield }, Vec2::ZERO));
        backend.set_collision_tags(walls, Category::WALL, Category::NONE);
        backend.add_entity(walls);

        // Separate bottom edge so its contacts are distinguishable
        let (hw, hh) = (config.half_width(), config.half_height());
        let bottom = backend.create_body(BodyDesc::fixed(
            Shape::Edge {
                from: Vec2::new(-hw, -hh),
                to: Vec2::new(hw, -hh),
            },
            Vec2::ZERO,
        ));
        backend.set_collision_tags(bottom, Category::BOTTOM, Category::NONE);
        backend.add_entity(bottom);

        backend.set_gravity(Vec2::ZERO);

        let coin = ServeCoin::new(config.seed);
        let mut controller = Self {
            backend,
            config,
            phase: GamePhase::NotRunning,
            input: InputState::Idle,
            score: 0,
            paddle: Paddle {
                entity: paddle_id,
                x: paddle_pos.x,
                y: paddle_pos.y,
                size: paddle_size,
            },
            ball,
            walls,
            bottom,
            bricks: Vec::new(),
            coin,
            events: Vec::new(),
        };
        controller.build_bricks();

        log::info!(
            "Scene ready: {}x{} playfield, {} bricks",
            controller.config.playfield_width,
            controller.config.playfield_height,
            controller.bricks.len()
        );
        Ok(controller)
    }

    fn build_bricks(&mut self) {
        for slot in brick_row(&self.config) {
            let entity = self
                .backend
                .create_body(BodyDesc::fixed(Shape::Rect { size: slot.size }, slot.pos));
            self.backend
                .set_collision_tags(entity, Category::BRICK, Category::NONE);
            self.backend.add_entity(entity);
            self.bricks.push(Brick {
                entity,
                column: slot.column,
                pos: slot.pos,
                size: slot.size,
                color: slot.color,
            });
        }
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn input_state(&self) -> InputState {
        self.input
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn ball(&self) -> EntityId {
        self.ball
    }

    pub fn ball_position(&self) -> Vec2 {
        self.backend.position(self.ball).unwrap_or(Vec2::ZERO)
    }

    pub fn ball_velocity(&self) -> Vec2 {
        self.backend.velocity(self.ball).unwrap_or(Vec2::ZERO)
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    /// Perimeter and bottom-edge boundary entities
    pub fn boundaries(&self) -> (EntityId, EntityId) {
        (self.walls, self.bottom)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Take queued events for presentation
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Input ===

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { at } => self.pointer_down(at),
            PointerEvent::Move { at, previous } => self.pointer_move(at, previous),
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }

    /// Grab the paddle if touched; serve if not running. Both may happen.
    pub fn pointer_down(&mut self, at: Vec2) {
        if self.backend.entity_at(at) == Some(self.paddle.entity) {
            self.input = InputState::DraggingPaddle;
        }

        if self.phase == GamePhase::NotRunning {
            let impulse = self.coin.flip().impulse(self.config.serve_impulse);
            self.backend.apply_impulse(self.ball, impulse);
            self.phase = GamePhase::Running;
            self.events.push(GameEvent::Served { impulse });
            log::info!("Served with impulse ({}, {})", impulse.x, impulse.y);
        }
    }

    /// Drag the paddle horizontally, only within the player's half
    pub fn pointer_move(&mut self, at: Vec2, previous: Vec2) {
        if self.input != InputState::DraggingPaddle || at.y >= 0.0 {
            return;
        }

        let dx = at.x - previous.x;
        match self.paddle.shifted(dx, self.config.half_width()) {
            Some(x) => {
                self.paddle.x = x;
                self.backend.set_position(self.paddle.entity, self.paddle.pos());
            }
            None => log::debug!("Paddle move of {dx} ignored at x={}", self.paddle.x),
        }
    }

    pub fn pointer_up(&mut self) {
        self.input = InputState::Idle;
    }

    // === Simulation ===

    /// Step the backend and dispatch its collision-begin contacts
    pub fn advance(&mut self, dt: f32) {
        let contacts = self.backend.step(dt);
        for contact in contacts {
            self.on_contact_begin(contact.a, contact.b);
        }
    }

    /// Remove a brick; unknown or already removed bricks are ignored
    fn destroy_brick(&mut self, entity: EntityId) {
        let Some(index) = self.bricks.iter().position(|b| b.entity == entity) else {
            return;
        };
        let brick = self.bricks.remove(index);
        self.backend.remove_entity(brick.entity);
        self.events.push(GameEvent::BrickDestroyed {
            column: brick.column,
        });
        log::debug!("Brick {} destroyed, {} left", brick.column, self.bricks.len());
    }

    /// Pause, then ask the host to present the modal
    fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.backend.set_paused(true);
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver);
        log::info!("Bottom collision, game over");
    }

    /// The player dismissed the game-over modal. False if not in game over.
    pub fn acknowledge_game_over(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.reset();
        true
    }

    /// Centre ball and paddle, clear bricks, resume simulation
    pub fn reset(&mut self) {
        self.backend.set_position(self.ball, Vec2::ZERO);
        self.backend.set_velocity(self.ball, Vec2::ZERO);

        self.paddle.x = 0.0;
        self.backend.set_position(self.paddle.entity, self.paddle.pos());

        self.phase = GamePhase::NotRunning;
        self.input = InputState::Idle;

        for brick in self.bricks.drain(..) {
            self.backend.remove_entity(brick.entity);
        }
        if self.config.rebuild_bricks_on_reset {
            self.build_bricks();
        }

        self.backend.set_paused(false);
        self.events.push(GameEvent::Reset);
        log::info!("Game reset, {} bricks", self.bricks.len());
    }
}

impl<B: PhysicsBackend> CollisionObserver for GameController<B> {
    fn on_contact_begin(&mut self, a: ContactBody, b: ContactBody) {
        if self.phase == GamePhase::GameOver {
            return;
        }

        if a.category.intersects(Category::BOTTOM) || b.category.intersects(Category::BOTTOM) {
            self.game_over();
        } else if a.category.intersects(Category::BRICK) {
            self.destroy_brick(a.entity);
        } else if b.category.intersects(Category::BRICK) {
            self.destroy_brick(b.entity);
        }
    }
}
