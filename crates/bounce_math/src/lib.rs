//! 2D Mathematics Library
//!
//! This crate provides the 2D vector type used by the bounce2d simulation.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`Axis`] - Selects one component of a [`Vec2`]

mod vec2;

pub use vec2::{Axis, Vec2};
