//! bounce2d - headless bouncing ball driver
//!
//! Runs the physics world at a fixed frame rate with periodic gravity and
//! logs where the ball would be drawn.

use bounce2d::config::AppConfig;
use bounce2d::systems::{SimulationSystem, ViewportSystem};
use bounce_physics::PhysicsWorld;

fn main() {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize logging (RUST_LOG still wins over the config)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting bounce2d");

    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    if let Err(e) = run(&config) {
        log::error!("Simulation stopped: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let viewport = ViewportSystem::from_config(config);
    let body = config.body.to_body()?;
    let mut world = PhysicsWorld::with_config(
        body,
        viewport.bounds()?,
        config.simulation.to_physics_config(),
    );
    let mut simulation = SimulationSystem::from_config(config);

    log::info!(
        "Viewport {:?} at zoom {}, bounds {:?}, {} frames of {:.2} ms",
        viewport.size(),
        viewport.zoom(),
        world.bounds(),
        config.simulation.frames,
        simulation.frame_ms()
    );

    let log_every = config.debug.log_every_frames;
    for _ in 0..config.simulation.frames {
        let result = simulation.update(&mut world)?;

        // Drawing would happen here, after the world is stepped
        if log_every > 0 && result.frame % log_every == 0 {
            let body = world.body();
            let (px, py) = viewport.to_pixels(body.position());
            log::debug!(
                "frame {:>5}: pos ({:>7.3}, {:>7.3}) vel ({:>7.3}, {:>7.3}) ke {:.4} J px ({:.0}, {:.0})",
                result.frame,
                body.position().x,
                body.position().y,
                body.velocity().x,
                body.velocity().y,
                body.kinetic_energy(),
                px,
                py
            );
        }
        // Resting on a wall reports it every frame; only log fresh contacts
        if !result.new_contacts.is_empty() {
            log::info!("frame {:>5}: hit {:?}", result.frame, result.new_contacts);
        }
    }

    let body = world.body();
    log::info!(
        "Finished after {} frames: ball at {:?} moving {:?} ({:.4} J)",
        simulation.frames_simulated(),
        body.position(),
        body.velocity(),
        body.kinetic_energy()
    );
    Ok(())
}
