//! bounce2d - a ball bouncing in a box
//!
//! Library half of the `bounce2d` binary: configuration loading and the
//! systems that drive a [`bounce_physics::PhysicsWorld`] frame by frame.

pub mod config;
pub mod systems;
