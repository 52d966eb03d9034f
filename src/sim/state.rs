//! Simulation state
//!
//! Everything needed to reproduce or resume a run lives here.

use glam::Vec2;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::body::BodySet;
use super::scene::spawn_bodies;
use super::tick::{FixedStep, StepReport, step};
use crate::error::Result;
use crate::settings::{PairMode, Settings};

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Seed the initial velocities were drawn from
    pub seed: u64,
    /// Ticks simulated so far
    pub time_ticks: u64,
    pub arena: Arena,
    pub bodies: BodySet,
    #[serde(default)]
    pub pair_mode: PairMode,
}

impl SimState {
    /// Build the scene described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let seed = settings.resolved_seed();
        let arena = Arena::new(settings.arena_width, settings.arena_height)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let bodies = BodySet::new(spawn_bodies(settings, &arena, &mut rng)?)?;

        info!(
            "{} scene: {} bodies in {}x{} arena (seed {})",
            settings.preset.as_str(),
            bodies.len(),
            arena.width,
            arena.height,
            seed
        );

        Ok(Self {
            seed,
            time_ticks: 0,
            arena,
            bodies,
            pair_mode: settings.pair_mode,
        })
    }

    /// Wrap an explicit body set
    pub fn with_bodies(arena: Arena, bodies: BodySet) -> Self {
        Self {
            seed: 0,
            time_ticks: 0,
            arena,
            bodies,
            pair_mode: PairMode::default(),
        }
    }

    /// Advance exactly one tick
    pub fn tick(&mut self) -> StepReport {
        let report = step(&mut self.bodies, &self.arena, 1.0, self.pair_mode);
        self.time_ticks += 1;
        report
    }

    /// Run as many ticks as `clock` allows for a frame of `frame_seconds`.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame_seconds: f32, clock: &mut FixedStep) -> u32 {
        let ticks = clock.advance(frame_seconds);
        for _ in 0..ticks {
            self.tick();
        }
        ticks
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.kinetic_energy()
    }

    pub fn momentum(&self) -> Vec2 {
        self.bodies.momentum()
    }

    /// True if every body lies fully inside the arena
    pub fn all_contained(&self) -> bool {
        self.bodies.iter().all(|b| self.arena.contains(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ScenePreset;

    fn seeded(preset: ScenePreset, seed: u64) -> SimState {
        let settings = Settings {
            seed: Some(seed),
            ..Settings::from_preset(preset)
        };
        SimState::from_settings(&settings).unwrap()
    }

    #[test]
    fn test_classic_scene_stays_contained() {
        let mut state = seeded(ScenePreset::Classic, 12345);
        assert!(state.all_contained());
        for _ in 0..2000 {
            state.tick();
            assert!(state.all_contained());
        }
        assert_eq!(state.time_ticks, 2000);
    }

    #[test]
    fn test_determinism() {
        let mut a = seeded(ScenePreset::Crowd, 99999);
        let mut b = seeded(ScenePreset::Crowd, 99999);
        for _ in 0..500 {
            a.tick();
            b.tick();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_advance_uses_clock() {
        let mut state = seeded(ScenePreset::Classic, 1);
        let mut clock = FixedStep::new(60.0, 4);
        let ticks = state.advance(2.0 / 60.0 + 1e-4, &mut clock);
        assert_eq!(ticks, 2);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_seed_reproduces_initial_bodies() {
        let state = seeded(ScenePreset::Classic, 31337);
        let json = serde_json::to_string(&state).unwrap();
        let restored: SimState = serde_json::from_str(&json).unwrap();

        let rebuilt = seeded(ScenePreset::Classic, restored.seed);
        assert_eq!(rebuilt.bodies, state.bodies);
    }

    #[test]
    fn test_with_bodies_ticks_explicit_set() {
        use crate::sim::Body;

        let bodies = BodySet::new(vec![Body::with_radius(
            0,
            Vec2::new(400.0, 300.0),
            Vec2::new(1.0, 0.0),
            20.0,
        )])
        .unwrap();
        let mut state = SimState::with_bodies(Arena::default(), bodies);
        assert_eq!(state.pair_mode, PairMode::Symmetric);
        state.tick();
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.bodies.get(0).unwrap().pos, Vec2::new(401.0, 300.0));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            ball_mass: -1.0,
            ..Settings::default()
        };
        assert!(SimState::from_settings(&settings).is_err());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state = seeded(ScenePreset::Classic, 7);
        for _ in 0..10 {
            state.tick();
        }
        let json = serde_json::to_string(&state).unwrap();
        let restored: SimState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed, state.seed);
        assert_eq!(restored.pair_mode, state.pair_mode);
        assert_eq!(restored.time_ticks, state.time_ticks);
        assert_eq!(restored.bodies.len(), state.bodies.len());
        for (a, b) in restored.bodies.iter().zip(state.bodies.iter()) {
            assert_eq!(a.id, b.id);
            assert!(a.pos.distance(b.pos) < 1e-3);
            assert!(a.vel.distance(b.vel) < 1e-5);
        }
    }
}
