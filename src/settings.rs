//! Simulation settings and scene presets
//!
//! Persisted as JSON: a file on native builds, LocalStorage in the browser.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Initial layouts the simulation can start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScenePreset {
    /// Eight glowing balls in the classic 800x600 box
    #[default]
    Classic,
    /// Two balls on a collision course through the arena centre
    HeadOn,
    /// A grid of `crowd_count` balls
    Crowd,
}

impl ScenePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenePreset::Classic => "Classic",
            ScenePreset::HeadOn => "HeadOn",
            ScenePreset::Crowd => "Crowd",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "disco" => Some(ScenePreset::Classic),
            "headon" | "head-on" | "head_on" => Some(ScenePreset::HeadOn),
            "crowd" => Some(ScenePreset::Crowd),
            _ => None,
        }
    }

}

/// Which ordered pairs each body checks during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PairMode {
    /// Every body checks every other body, so each pair is seen twice.
    /// The second look usually finds the pair separating and does nothing.
    #[default]
    Symmetric,
    /// Body `i` only checks bodies after it; each pair is seen once.
    /// A pair that only starts overlapping after the earlier body moved is
    /// not resolved until the next tick.
    Once,
}

impl PairMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairMode::Symmetric => "Symmetric",
            PairMode::Once => "Once",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "symmetric" | "both" | "twice" => Some(PairMode::Symmetric),
            "once" | "single" => Some(PairMode::Once),
            _ => None,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial layout
    pub preset: ScenePreset,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Balls ===
    pub ball_radius: f32,
    pub ball_mass: f32,
    /// Initial velocity spread per axis (units/tick)
    pub max_speed: f32,
    /// Ball count for the Crowd preset
    pub crowd_count: u32,

    /// RNG seed; None picks one at startup
    pub seed: Option<u64>,

    // === Stepping ===
    pub pair_mode: PairMode,
    /// Simulation ticks per second
    pub tick_rate_hz: f32,
    /// Maximum ticks per rendered frame
    pub max_substeps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: ScenePreset::Classic,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            max_speed: MAX_SPEED,
            crowd_count: 24,

            seed: None,

            pair_mode: PairMode::Symmetric,
            tick_rate_hz: TICK_RATE_HZ,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl Settings {
    /// Default settings with a different preset
    pub fn from_preset(preset: ScenePreset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f32) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidParam(format!("{name} must be > 0, got {v}")))
            }
        }

        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("ball_radius", self.ball_radius)?;
        positive("ball_mass", self.ball_mass)?;
        positive("tick_rate_hz", self.tick_rate_hz)?;

        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(Error::InvalidParam(format!(
                "max_speed must be >= 0, got {}",
                self.max_speed
            )));
        }
        if self.max_substeps == 0 {
            return Err(Error::InvalidParam("max_substeps must be >= 1".into()));
        }
        if self.preset == ScenePreset::Crowd && self.crowd_count == 0 {
            return Err(Error::InvalidParam("crowd_count must be >= 1".into()));
        }
        Ok(())
    }

    /// Seed to use for this run
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "disco_bounce_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring saved settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}
