//! Viewport system
//!
//! Tracks the viewport size and zoom, keeps the world bounds in sync with it,
//! and converts simulation coordinates to pixels for whoever draws the ball.

use bounce_math::Vec2;
use bounce_physics::{recompute_bounds, Bounds, PhysicsError, PhysicsWorld};

use crate::config::AppConfig;

/// Viewport size in pixels plus the pixels-per-meter zoom
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportSystem {
    width: u32,
    height: u32,
    zoom: f32,
}

impl ViewportSystem {
    pub fn new(width: u32, height: u32, zoom: f32) -> Self {
        Self { width, height, zoom }
    }

    /// Create a viewport system from application config
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.viewport.width, config.viewport.height, config.simulation.zoom)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Bounds matching the current viewport
    pub fn bounds(&self) -> Result<Bounds, PhysicsError> {
        recompute_bounds(self.width as f32, self.height as f32, self.zoom)
    }

    /// Handle a viewport resize
    ///
    /// Recomputes the world bounds and clamps the ball back inside. Returns
    /// `false` without touching the world when the size did not change.
    pub fn resize(&mut self, world: &mut PhysicsWorld, width: u32, height: u32) -> Result<bool, PhysicsError> {
        if (width, height) == (self.width, self.height) {
            return Ok(false);
        }

        let bounds = world.resize(width as f32, height as f32, self.zoom)?;
        self.width = width;
        self.height = height;
        log::info!(
            "Viewport resized to {}x{}: bounds {:?}",
            width,
            height,
            bounds
        );
        Ok(true)
    }

    /// Pixel coordinates of a simulation position, origin at the top-left corner
    pub fn to_pixels(&self, position: Vec2) -> (f32, f32) {
        (
            position.x * self.zoom + self.width as f32 / 2.0,
            position.y * self.zoom + self.height as f32 / 2.0,
        )
    }
}
