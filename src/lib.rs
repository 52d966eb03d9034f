//! Disco Bounce - glowing balls bouncing in a box
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, arena, elastic collisions)
//! - `renderer`: Draws simulation snapshots (log output natively, canvas on web)
//! - `settings`: User configuration and scene presets
//! - `error`: Construction/configuration errors

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{PairMode, ScenePreset, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Nominal tick rate (one tick per repaint at 60 Hz)
    pub const TICK_RATE_HZ: f32 = 60.0;
    /// Maximum ticks run for a single frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame the fixed-step driver will account for (seconds)
    pub const MAX_FRAME_SECONDS: f32 = 0.1;

    /// Arena dimensions of the classic scene
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    pub const BALL_MASS: f32 = 1.0;
    /// Spread of the initial velocity per axis (units/tick); components are
    /// drawn from [-MAX_SPEED/2, MAX_SPEED/2)
    pub const MAX_SPEED: f32 = 6.0;

    /// Centre distances below this are treated as coincident (no collision)
    pub const CONTACT_EPSILON: f32 = 1e-6;
}

/// Format a 0xRRGGBB color as a CSS hex string
#[inline]
pub fn css_color(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0x00ff_ffff)
}
