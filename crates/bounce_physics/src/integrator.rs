//! Position integration and wall collision resolution
//!
//! Each step converts velocity into a displacement for the elapsed time and
//! checks both axes against the walls independently, Y first then X. A ball
//! heading into a corner can therefore bounce off two walls in the same step.

use crate::body::Body;
use crate::bounds::Bounds;
use bitflags::bitflags;
use bounce_math::Axis;

/// Elapsed time used when the caller has no frame timing (one second)
pub const DEFAULT_ELAPSED_MS: f32 = 1000.0;

/// Displacements smaller than this are treated as resting contact
pub const DEFAULT_CONTACT_THRESHOLD: f32 = 0.1;

bitflags! {
    /// Walls touched during a single integration step
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Walls: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl Walls {
    /// The wall on the negative side of `axis` (top or left)
    pub fn negative(axis: Axis) -> Self {
        match axis {
            Axis::X => Walls::LEFT,
            Axis::Y => Walls::TOP,
        }
    }

    /// The wall on the positive side of `axis` (bottom or right)
    pub fn positive(axis: Axis) -> Self {
        match axis {
            Axis::X => Walls::RIGHT,
            Axis::Y => Walls::BOTTOM,
        }
    }
}

/// Outcome of resolving one axis
#[derive(Clone, Copy, Debug)]
struct AxisResolution {
    position: f32,
    velocity: f32,
    wall: Walls,
}

/// Advances a [`Body`] through time inside a set of [`Bounds`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Integrator {
    /// Minimum displacement for which an impact is rescaled onto the wall
    contact_threshold: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            contact_threshold: DEFAULT_CONTACT_THRESHOLD,
        }
    }
}

impl Integrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the displacement below which wall contact counts as resting
    pub fn with_contact_threshold(mut self, threshold: f32) -> Self {
        self.contact_threshold = threshold.abs();
        self
    }

    pub fn contact_threshold(&self) -> f32 {
        self.contact_threshold
    }

    /// Move `body` by its velocity over `elapsed_ms` and bounce it off `bounds`
    ///
    /// Both axes are resolved from the state at the start of the step and the
    /// results are written back together. Returns the walls that were hit.
    ///
    /// On impact (displacement of at least the contact threshold) the ball is
    /// placed exactly on the wall and its velocity on that axis becomes
    /// `-bounce * velocity`. Under the threshold the velocity is still
    /// inverted, but the ball only creeps by the bounced velocity scaled
    /// once more by `-bounce`, and never past the wall.
    ///
    /// `elapsed_ms` is not validated; zero or negative values simply produce
    /// zero or backwards displacement.
    pub fn update_position(&self, body: &mut Body, bounds: &Bounds, elapsed_ms: f32) -> Walls {
        let dt = elapsed_ms / 1000.0;
        let position = body.position();
        let velocity = body.velocity();

        let mut next_position = position;
        let mut next_velocity = velocity;
        let mut walls = Walls::empty();

        for axis in Axis::RESOLVE_ORDER {
            let resolved = self.resolve_axis(
                axis,
                position.get(axis),
                velocity.get(axis),
                body.radius(),
                body.bounce_coefficient(),
                bounds,
                dt,
            );
            *next_position.get_mut(axis) = resolved.position;
            *next_velocity.get_mut(axis) = resolved.velocity;
            walls |= resolved.wall;
        }

        if !walls.is_empty() {
            log::debug!(
                "Bounced off {:?}: velocity {:?} -> {:?}",
                walls,
                velocity,
                next_velocity
            );
        }

        body.set_position(next_position);
        body.set_velocity(next_velocity);
        walls
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_axis(
        &self,
        axis: Axis,
        position: f32,
        velocity: f32,
        radius: f32,
        bounce: f32,
        bounds: &Bounds,
        dt: f32,
    ) -> AxisResolution {
        let displacement = velocity * dt;

        // Centre coordinate at which the ball touches the wall it is heading into
        let (contact, wall) = if position + radius + displacement >= bounds.max(axis) {
            (bounds.max(axis) - radius, Walls::positive(axis))
        } else if position - radius + displacement <= bounds.min(axis) {
            (bounds.min(axis) + radius, Walls::negative(axis))
        } else {
            return AxisResolution {
                position: position + displacement,
                velocity,
                wall: Walls::empty(),
            };
        };

        let bounced = velocity * -bounce;

        let position = if displacement.abs() >= self.contact_threshold {
            // Displacement rescaled to the wall distance lands exactly on the
            // contact point, so place the ball there.
            contact
        } else {
            let creep = position + bounced * dt * -bounce;
            if wall == Walls::positive(axis) {
                creep.min(contact)
            } else {
                creep.max(contact)
            }
        };

        AxisResolution {
            position,
            velocity: bounced,
            wall,
        }
    }
}

/// Step `body` with the default contact threshold
pub fn update_position(body: &mut Body, bounds: &Bounds, elapsed_ms: f32) -> Walls {
    Integrator::default().update_position(body, bounds, elapsed_ms)
}
