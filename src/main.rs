//! Brick Pong entry point
//!
//! Native headless demo: builds the scene on the reference world, serves,
//! drags the paddle, and plays until the ball reaches the bottom.

use glam::Vec2;

use brick_pong::consts::SIM_DT;
use brick_pong::sim::{GameController, GameEvent, GamePhase, PointerEvent, SceneEntities, World};
use brick_pong::GameConfig;

/// Give up after a minute of simulated play
const MAX_TICKS: u32 = 120 * 60;

fn load_config() -> GameConfig {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("No config given, using defaults");
        return GameConfig::default();
    };

    GameConfig::load(&path).unwrap_or_else(|e| {
        log::warn!("Could not use config {path} ({e}), using defaults");
        GameConfig::default()
    })
}

fn run() -> Result<(), brick_pong::ConfigurationError> {
    let config = load_config();

    // Host scene: paddle near the bottom, ball at the centre
    let mut world = World::new();
    let paddle_y = -config.half_height() + 100.0;
    world.spawn_node("paddle", Vec2::new(0.0, paddle_y), Vec2::new(150.0, 30.0));
    world.spawn_node("ball", Vec2::ZERO, Vec2::splat(30.0));
    let scene = SceneEntities {
        paddle: world.find_by_name("paddle"),
        ball: world.find_by_name("ball"),
    };

    let mut game = GameController::new(world, scene, config)?;

    // Press on the paddle (also serves) and nudge it right
    let grab = Vec2::new(0.0, paddle_y);
    game.handle_pointer(PointerEvent::Down { at: grab });
    game.handle_pointer(PointerEvent::Move {
        at: grab + Vec2::new(60.0, 0.0),
        previous: grab,
    });
    game.handle_pointer(PointerEvent::Up {
        at: grab + Vec2::new(60.0, 0.0),
    });

    let mut ticks = 0;
    while ticks < MAX_TICKS && game.phase() != GamePhase::GameOver {
        game.advance(SIM_DT);
        ticks += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::BrickDestroyed { column } => {
                    println!("Brick {column} destroyed ({} left)", game.bricks().len());
                }
                GameEvent::GameOver => println!("Game Over [Okay]"),
                other => log::debug!("{other:?}"),
            }
        }
    }

    if game.phase() == GamePhase::GameOver {
        game.acknowledge_game_over();
    }

    println!(
        "Finished after {:.2}s: phase={:?}, score={}, bricks={}",
        ticks as f32 * SIM_DT,
        game.phase(),
        game.score(),
        game.bricks().len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Brick Pong (headless) starting...");

    if let Err(e) = run() {
        log::error!("Scene setup failed: {e}");
        std::process::exit(1);
    }
}
