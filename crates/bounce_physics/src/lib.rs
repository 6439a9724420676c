//! Bounded ball physics for bounce2d
//!
//! This crate provides the simulation core:
//! - The ball state ([`Body`])
//! - Axis-aligned walls derived from a viewport ([`Bounds`])
//! - Integration with wall bounces ([`Integrator`])
//! - Accelerations delivered in timed samples ([`ImpulseScheduler`])
//! - An owned world tying them together ([`PhysicsWorld`])

pub mod body;
pub mod bounds;
pub mod error;
pub mod impulse;
pub mod integrator;
pub mod world;

// Re-export commonly used types
pub use body::{Body, DEFAULT_BOUNCE, DEFAULT_MASS, DEFAULT_RADIUS};
pub use bounds::{clamp_to_bounds, recompute_bounds, Bounds};
pub use error::PhysicsError;
pub use impulse::{apply_acceleration, ImpulseKey, ImpulseSchedule, ImpulseScheduler, DEFAULT_NUM_SAMPLES};
pub use integrator::{update_position, Integrator, Walls, DEFAULT_CONTACT_THRESHOLD, DEFAULT_ELAPSED_MS};
pub use world::{PhysicsConfig, PhysicsWorld, StepReport};
