//! Owned simulation state: one ball inside one box

use crate::body::Body;
use crate::bounds::{recompute_bounds, Bounds};
use crate::error::PhysicsError;
use crate::impulse::{apply_acceleration, ImpulseKey, ImpulseScheduler};
use crate::integrator::{Integrator, Walls};
use bounce_math::Vec2;

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Displacement below which a wall contact counts as resting
    pub contact_threshold: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            contact_threshold: crate::integrator::DEFAULT_CONTACT_THRESHOLD,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given contact threshold
    pub fn new(contact_threshold: f32) -> Self {
        Self { contact_threshold }
    }
}

/// Result of a single [`PhysicsWorld::step`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Impulse samples delivered before integrating
    pub samples_delivered: u32,
    /// Walls the ball bounced off
    pub walls: Walls,
}

/// The ball, its bounds and everything that moves it
///
/// Replaces a shared global ball: callers own the world and pass it to
/// whatever drives frames and draws.
#[derive(Debug)]
pub struct PhysicsWorld {
    body: Body,
    bounds: Bounds,
    integrator: Integrator,
    impulses: ImpulseScheduler,
}

impl PhysicsWorld {
    /// Create a world with default configuration
    pub fn new(body: Body, bounds: Bounds) -> Self {
        Self::with_config(body, bounds, PhysicsConfig::default())
    }

    /// Create a world with custom configuration
    pub fn with_config(mut body: Body, bounds: Bounds, config: PhysicsConfig) -> Self {
        body.clamp_to_bounds(&bounds);
        Self {
            body,
            bounds,
            integrator: Integrator::new().with_contact_threshold(config.contact_threshold),
            impulses: ImpulseScheduler::new(),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn impulses(&self) -> &ImpulseScheduler {
        &self.impulses
    }

    /// Apply an acceleration now or spread over `time_period_ms`
    ///
    /// See [`apply_acceleration`] for the sampling rules.
    pub fn apply_acceleration(
        &mut self,
        acceleration: Vec2,
        time_period_ms: f32,
        num_samples: u32,
    ) -> Result<Option<ImpulseKey>, PhysicsError> {
        apply_acceleration(
            &mut self.body,
            &mut self.impulses,
            acceleration,
            time_period_ms,
            num_samples,
        )
    }

    /// Stop a spread acceleration early
    pub fn cancel_impulse(&mut self, key: ImpulseKey) -> bool {
        self.impulses.cancel(key)
    }

    /// Step the simulation forward by `elapsed_ms` milliseconds
    ///
    /// This performs:
    /// 1. Delivery of impulse samples that came due during the step
    /// 2. Integration and wall collision resolution
    pub fn step(&mut self, elapsed_ms: f32) -> StepReport {
        let samples_delivered = self.impulses.advance(&mut self.body, elapsed_ms);
        let walls = self
            .integrator
            .update_position(&mut self.body, &self.bounds, elapsed_ms);

        StepReport {
            samples_delivered,
            walls,
        }
    }

    /// Replace the bounds and pull the ball back inside them
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.body.clamp_to_bounds(&self.bounds);
    }

    /// Recompute the bounds for a new viewport size
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32, zoom: f32) -> Result<Bounds, PhysicsError> {
        let bounds = recompute_bounds(viewport_width, viewport_height, zoom)?;
        self.set_bounds(bounds);
        Ok(bounds)
    }
}
