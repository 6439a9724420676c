//! The simulated ball

use crate::bounds::{clamp_to_bounds, Bounds};
use crate::error::{require_positive, PhysicsError};
use bounce_math::Vec2;
use serde::{Deserialize, Serialize};

/// Default mass of the ball in kilograms
pub const DEFAULT_MASS: f32 = 0.05;
/// Default radius of the ball in meters
pub const DEFAULT_RADIUS: f32 = 1.0;
/// Default velocity multiplier applied on a bounce
pub const DEFAULT_BOUNCE: f32 = 0.5;

/// A point-mass ball with position, velocity and bounce behaviour
///
/// Anyone may read the state. Velocity is only changed by the integrator and
/// by impulse delivery; position is only changed by the integrator and by
/// clamping into new bounds.
///
/// Deserialization goes through [`Body::new`], so serialized state is held to
/// the same mass and radius checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BodyState")]
pub struct Body {
    /// Position relative to the origin (meters)
    position: Vec2,
    /// Velocity (meters per second)
    velocity: Vec2,
    /// Mass (kilograms, > 0)
    mass: f32,
    /// Radius (meters, > 0)
    radius: f32,
    /// Velocity multiplier applied on a bounce (0.0 = dead stop, 1.0 = perfect bounce)
    ///
    /// Not clamped: values above 1.0 add energy on every bounce.
    bounce_coefficient: f32,
}

impl Body {
    /// Create a body at rest at the origin
    ///
    /// Fails with [`PhysicsError::InvalidParameter`] when `mass` or `radius`
    /// is not a finite positive number.
    pub fn new(mass: f32, radius: f32, bounce_coefficient: f32) -> Result<Self, PhysicsError> {
        let mass = require_positive("mass", mass)?;
        let radius = require_positive("radius", radius)?;
        if !(0.0..=1.0).contains(&bounce_coefficient) {
            log::warn!(
                "Bounce coefficient {} is outside [0, 1]; bounces will not conserve energy",
                bounce_coefficient
            );
        }

        Ok(Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass,
            radius,
            bounce_coefficient,
        })
    }

    /// Set the starting position of this body
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Set the starting velocity of this body
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn bounce_coefficient(&self) -> f32 {
        self.bounce_coefficient
    }

    /// Kinetic energy in joules
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Pull the body back inside `bounds` if it is now out of range
    ///
    /// Called by whoever owns the viewport after the bounds shrink.
    pub fn clamp_to_bounds(&mut self, bounds: &Bounds) {
        self.position = clamp_to_bounds(self.position, self.radius, bounds);
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Add a velocity increment (one impulse sample, or a whole instant impulse)
    pub(crate) fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += delta;
    }
}

/// Serialized body fields before validation
#[derive(Deserialize)]
struct BodyState {
    #[serde(default)]
    position: Vec2,
    #[serde(default)]
    velocity: Vec2,
    mass: f32,
    radius: f32,
    bounce_coefficient: f32,
}

impl TryFrom<BodyState> for Body {
    type Error = PhysicsError;

    fn try_from(state: BodyState) -> Result<Self, Self::Error> {
        Ok(Self::new(state.mass, state.radius, state.bounce_coefficient)?
            .with_position(state.position)
            .with_velocity(state.velocity))
    }
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: DEFAULT_MASS,
            radius: DEFAULT_RADIUS,
            bounce_coefficient: DEFAULT_BOUNCE,
        }
    }
}
