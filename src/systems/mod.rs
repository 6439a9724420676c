//! Application systems
//!
//! The frame driver and the viewport glue that sit around the physics world.

mod simulation;
mod viewport;

pub use simulation::{FrameResult, GravityTicker, SimulationSystem};
pub use viewport::ViewportSystem;
