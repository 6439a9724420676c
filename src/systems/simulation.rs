//! Fixed-cadence simulation system
//!
//! Drives the physics world one frame at a time:
//! - Periodic gravity impulses
//! - Impulse sample delivery and integration
//! - Frame counting

use bounce_math::Vec2;
use bounce_physics::{PhysicsError, PhysicsWorld, StepReport, Walls};

use crate::config::AppConfig;

/// Fraction of an interval a tick may fire early, absorbing f32 clock drift
const TICK_TOLERANCE: f32 = 1e-3;

/// Result of a simulation update
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameResult {
    /// Index of the frame that was just simulated (starting at 0)
    pub frame: u64,
    /// Number of gravity ticks scheduled this frame
    pub gravity_ticks: u32,
    /// What the physics step did
    pub step: StepReport,
    /// Walls touched this frame that were not touched the frame before
    pub new_contacts: Walls,
}

/// Re-applies gravity as a sampled acceleration at a fixed interval
///
/// The first tick fires on the first frame, later ones every `interval_ms`.
/// A frame longer than the interval fires every tick that fell due inside it.
/// A non-positive interval only fires the first tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GravityTicker {
    acceleration: Vec2,
    interval_ms: f32,
    period_ms: f32,
    samples: u32,
    /// Time since the last tick, `None` before the first one
    since_last_ms: Option<f32>,
}

impl GravityTicker {
    pub fn new(acceleration: Vec2, interval_ms: f32, period_ms: f32, samples: u32) -> Self {
        Self {
            acceleration,
            interval_ms,
            period_ms,
            samples,
            since_last_ms: None,
        }
    }

    /// Gravity ticker described by the config, or `None` when disabled
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let gravity = &config.gravity;
        if gravity.interval_ms <= 0.0 || gravity.acceleration == 0.0 {
            return None;
        }
        Some(Self::new(
            Vec2::new(0.0, gravity.acceleration),
            gravity.interval_ms,
            gravity.period_ms,
            gravity.samples_for(config.simulation.fps),
        ))
    }

    /// Advance the ticker clock, scheduling gravity on `world` for each tick due
    fn tick(&mut self, world: &mut PhysicsWorld, frame_ms: f32) -> Result<u32, PhysicsError> {
        let Some(since_last) = self.since_last_ms else {
            world.apply_acceleration(self.acceleration, self.period_ms, self.samples)?;
            self.since_last_ms = Some(0.0);
            return Ok(1);
        };
        if self.interval_ms <= 0.0 {
            return Ok(0);
        }

        let mut since_last = since_last + frame_ms;
        let tolerance = self.interval_ms * TICK_TOLERANCE;
        let mut ticks = 0;
        while since_last + tolerance >= self.interval_ms {
            world.apply_acceleration(self.acceleration, self.period_ms, self.samples)?;
            since_last -= self.interval_ms;
            ticks += 1;
        }
        self.since_last_ms = Some(since_last);
        Ok(ticks)
    }
}

/// Manages the simulation frame loop
///
/// Each call to [`update`](Self::update) simulates exactly one frame of
/// `1000 / fps` milliseconds. The world is fully stepped before the caller
/// gets the result back, so any drawing done afterwards sees the new state.
#[derive(Debug)]
pub struct SimulationSystem {
    frame_ms: f32,
    frame: u64,
    gravity: Option<GravityTicker>,
    /// Walls touched by the previous frame
    touching: Walls,
}

impl SimulationSystem {
    /// Create a new simulation system running at `fps` frames per second
    pub fn new(fps: u32) -> Self {
        Self {
            frame_ms: 1000.0 / fps.max(1) as f32,
            frame: 0,
            gravity: None,
            touching: Walls::empty(),
        }
    }

    /// Create a simulation system from application config
    pub fn from_config(config: &AppConfig) -> Self {
        let mut system = Self::new(config.simulation.fps);
        system.gravity = GravityTicker::from_config(config);
        system
    }

    /// Set the gravity ticker
    pub fn with_gravity(mut self, gravity: GravityTicker) -> Self {
        self.gravity = Some(gravity);
        self
    }

    /// Milliseconds simulated per frame
    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }

    /// Number of frames simulated so far
    pub fn frames_simulated(&self) -> u64 {
        self.frame
    }

    /// Run one simulation frame
    pub fn update(&mut self, world: &mut PhysicsWorld) -> Result<FrameResult, PhysicsError> {
        // 1. Gravity tick
        let gravity_ticks = match self.gravity.as_mut() {
            Some(gravity) => gravity.tick(world, self.frame_ms)?,
            None => 0,
        };

        // 2. Deliver impulse samples and integrate
        let step = world.step(self.frame_ms);

        // 3. Contact changes
        let new_contacts = step.walls - self.touching;
        self.touching = step.walls;

        let result = FrameResult {
            frame: self.frame,
            gravity_ticks,
            step,
            new_contacts,
        };
        self.frame += 1;
        Ok(result)
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(60)
    }
}
