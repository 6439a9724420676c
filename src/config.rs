//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BOUNCE_SECTION__KEY`)

use bounce_math::Vec2;
use bounce_physics::{Body, PhysicsConfig, PhysicsError, DEFAULT_BOUNCE, DEFAULT_CONTACT_THRESHOLD, DEFAULT_MASS, DEFAULT_RADIUS};
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ball configuration
    #[serde(default)]
    pub body: BodyConfig,
    /// Frame driver configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Periodic gravity configuration
    #[serde(default)]
    pub gravity: GravityConfig,
    /// Viewport configuration
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`BOUNCE_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional, gitignored
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BOUNCE_BODY__BOUNCE=0.9 -> body.bounce = 0.9
        figment = figment.merge(Env::prefixed("BOUNCE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Ball configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Mass in kilograms
    pub mass: f32,
    /// Radius in meters
    pub radius: f32,
    /// Velocity multiplier applied on a bounce
    pub bounce: f32,
    /// Starting position in meters from the viewport centre
    pub start_position: Vec2,
    /// Starting velocity in meters per second
    pub start_velocity: Vec2,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            radius: DEFAULT_RADIUS,
            bounce: DEFAULT_BOUNCE,
            start_position: Vec2::ZERO,
            start_velocity: Vec2::ZERO,
        }
    }
}

impl BodyConfig {
    /// Build the ball described by this config
    pub fn to_body(&self) -> Result<Body, PhysicsError> {
        Ok(Body::new(self.mass, self.radius, self.bounce)?
            .with_position(self.start_position)
            .with_velocity(self.start_velocity))
    }
}

/// Frame driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frames per second of the fixed-cadence driver
    pub fps: u32,
    /// Pixels per meter
    pub zoom: f32,
    /// Displacement below which a wall contact counts as resting
    pub contact_threshold: f32,
    /// Number of frames the headless driver runs before exiting
    pub frames: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            zoom: 20.0,
            contact_threshold: DEFAULT_CONTACT_THRESHOLD,
            frames: 600,
        }
    }
}

impl SimulationConfig {
    /// Milliseconds between two frames
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.fps.max(1) as f32
    }

    /// Convert to the physics engine's configuration
    pub fn to_physics_config(&self) -> PhysicsConfig {
        PhysicsConfig::new(self.contact_threshold)
    }
}

/// Periodic gravity configuration
///
/// Gravity is applied as a sampled acceleration once at start-up and again
/// every `interval_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    /// Downward acceleration in m/s² (positive = down)
    pub acceleration: f32,
    /// Milliseconds between two gravity ticks (0 disables gravity)
    pub interval_ms: f32,
    /// Milliseconds each tick spreads its acceleration over
    pub period_ms: f32,
    /// Samples per tick (0 = one per frame)
    pub samples: u32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            acceleration: 9.81,
            interval_ms: 1000.0,
            period_ms: 1000.0,
            samples: 0,
        }
    }
}

impl GravityConfig {
    /// Samples per tick, falling back to the frame rate
    pub fn samples_for(&self, fps: u32) -> u32 {
        if self.samples == 0 {
            fps.max(1)
        } else {
            self.samples
        }
    }
}

/// Viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log the ball state every this many frames (0 = never)
    pub log_every_frames: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_every_frames: 30,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
