//! Deterministic simulation module
//!
//! The physics core lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the body set)
//! - No rendering or platform dependencies

pub mod arena;
pub mod body;
pub mod collision;
pub mod scene;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use body::{Body, BodySet};
pub use collision::{PairOutcome, bounce_walls, clamp_to_arena, closing_speed, resolve_pair};
pub use scene::spawn_bodies;
pub use state::SimState;
pub use tick::{FixedStep, StepReport, step};
