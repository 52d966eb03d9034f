//! Fixed timestep simulation tick
//!
//! `step` advances every body by one tick. Bodies are updated in place and
//! in order, so a body sees the already-moved positions of the bodies before
//! it in the set.

use log::warn;

use super::arena::Arena;
use super::body::{Body, BodySet};
use super::collision::{PairOutcome, bounce_walls, clamp_to_arena, resolve_pair};
use crate::consts::{MAX_FRAME_SECONDS, MAX_SUBSTEPS, TICK_RATE_HZ};
use crate::settings::PairMode;

/// Counters collected during one step (diagnostics only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Bodies whose velocity was reflected by a wall
    pub wall_bounces: u32,
    /// Pair checks that applied an impulse
    pub collisions: u32,
    /// Overlapping pairs skipped because their centres coincided
    pub skipped_degenerate: u32,
}

/// Advance all bodies by one step.
///
/// For each body in order:
/// 1. reflect velocity off any wall its edge touches
/// 2. clamp it inside the arena
/// 3. resolve contacts with the other bodies (`pair_mode` decides which)
/// 4. integrate `pos += vel * delta_ticks`, then clamp again
///
/// Velocities are in units per tick, so `delta_ticks = 1.0` is one full tick.
pub fn step(
    bodies: &mut BodySet,
    arena: &Arena,
    delta_ticks: f32,
    pair_mode: PairMode,
) -> StepReport {
    let mut report = StepReport::default();

    if !(delta_ticks.is_finite() && delta_ticks > 0.0) {
        warn!("Ignoring step with delta_ticks = {}", delta_ticks);
        return report;
    }

    let bodies = bodies.as_mut_slice();
    let n = bodies.len();

    for i in 0..n {
        if bounce_walls(&mut bodies[i], arena) {
            report.wall_bounces += 1;
        }
        clamp_to_arena(&mut bodies[i], arena);

        let first_other = match pair_mode {
            PairMode::Symmetric => 0,
            PairMode::Once => i + 1,
        };
        for j in first_other..n {
            if j == i {
                continue;
            }
            let (body, other) = pair_mut(bodies, i, j);
            match resolve_pair(body, other) {
                PairOutcome::Impulse { .. } => report.collisions += 1,
                PairOutcome::Degenerate => report.skipped_degenerate += 1,
                PairOutcome::Apart | PairOutcome::Separating => {}
            }
        }

        let body = &mut bodies[i];
        body.pos += body.vel * delta_ticks;
        clamp_to_arena(body, arena);
    }

    report
}

/// Mutable references to two distinct bodies, in the order asked for
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Converts variable frame time into whole simulation ticks.
///
/// Frame time accumulates; every full tick interval yields one tick, up to
/// `max_substeps` per frame. Left-over time carries to the next frame.
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    tick_seconds: f32,
    max_substeps: u32,
}

impl FixedStep {
    /// A rate that is not finite and positive falls back to `TICK_RATE_HZ`
    pub fn new(tick_rate_hz: f32, max_substeps: u32) -> Self {
        let rate = if tick_rate_hz.is_finite() && tick_rate_hz > 0.0 {
            tick_rate_hz
        } else {
            warn!(
                "Invalid tick rate {} Hz, using {} Hz",
                tick_rate_hz, TICK_RATE_HZ
            );
            TICK_RATE_HZ
        };
        Self {
            accumulator: 0.0,
            tick_seconds: 1.0 / rate,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn tick_seconds(&self) -> f32 {
        self.tick_seconds
    }

    /// Add a frame's elapsed time and return how many ticks to run
    pub fn advance(&mut self, frame_seconds: f32) -> u32 {
        let dt = if frame_seconds.is_finite() {
            frame_seconds.clamp(0.0, MAX_FRAME_SECONDS)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.tick_seconds && ticks < self.max_substeps {
            self.accumulator -= self.tick_seconds;
            ticks += 1;
        }
        // Drop whatever the substep cap could not absorb
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.tick_seconds);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(TICK_RATE_HZ, MAX_SUBSTEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn set(bodies: Vec<Body>) -> BodySet {
        BodySet::new(bodies).unwrap()
    }

    fn ball(id: u32, x: f32, y: f32, dx: f32, dy: f32) -> Body {
        Body::with_radius(id, Vec2::new(x, y), Vec2::new(dx, dy), 20.0)
    }

    #[test]
    fn test_free_body_moves_by_velocity() {
        let arena = Arena::default();
        let mut bodies = set(vec![ball(0, 400.0, 300.0, 1.5, -2.0)]);
        let report = step(&mut bodies, &arena, 1.0, PairMode::Symmetric);
        assert_eq!(report, StepReport::default());
        assert_eq!(bodies.as_slice()[0].pos, Vec2::new(401.5, 298.0));
    }

    #[test]
    fn test_delta_ticks_scales_motion() {
        let arena = Arena::default();
        let mut bodies = set(vec![ball(0, 400.0, 300.0, 2.0, 0.0)]);
        step(&mut bodies, &arena, 0.5, PairMode::Symmetric);
        assert_eq!(bodies.as_slice()[0].pos.x, 401.0);
    }

    #[test]
    fn test_bad_delta_ticks_is_noop() {
        let arena = Arena::default();
        let mut bodies = set(vec![ball(0, 400.0, 300.0, 2.0, 0.0)]);
        let before = bodies.clone();
        step(&mut bodies, &arena, 0.0, PairMode::Symmetric);
        step(&mut bodies, &arena, f32::NAN, PairMode::Symmetric);
        step(&mut bodies, &arena, -1.0, PairMode::Symmetric);
        assert_eq!(bodies, before);
    }

    #[test]
    fn test_symmetric_and_once_agree_on_head_on() {
        let arena = Arena::default();
        for mode in [PairMode::Symmetric, PairMode::Once] {
            let mut bodies = set(vec![
                ball(0, 90.0, 100.0, 2.0, 0.0),
                ball(1, 110.0, 100.0, -2.0, 0.0),
            ]);
            let report = step(&mut bodies, &arena, 1.0, mode);
            assert_eq!(report.collisions, 1, "mode {:?}", mode);
            assert!((bodies.as_slice()[0].vel.x + 2.0).abs() < 1e-5);
            assert!((bodies.as_slice()[1].vel.x - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_pair_mut_order() {
        let mut bodies = vec![ball(0, 0.0, 0.0, 0.0, 0.0), ball(1, 0.0, 0.0, 0.0, 0.0)];
        let (a, b) = pair_mut(&mut bodies, 1, 0);
        assert_eq!((a.id, b.id), (1, 0));
        let (a, b) = pair_mut(&mut bodies, 0, 1);
        assert_eq!((a.id, b.id), (0, 1));
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut fs = FixedStep::new(60.0, 4);
        // Half a tick: nothing yet
        assert_eq!(fs.advance(1.0 / 120.0), 0);
        // Another half plus a bit: one tick
        assert_eq!(fs.advance(1.0 / 120.0 + 1e-4), 1);
        // Two ticks worth
        assert_eq!(fs.advance(2.0 / 60.0), 2);
    }

    #[test]
    fn test_fixed_step_rejects_bad_rate() {
        for rate in [-60.0, 0.0, f32::NAN, f32::INFINITY] {
            let mut fs = FixedStep::new(rate, 4);
            assert!((fs.tick_seconds() - 1.0 / TICK_RATE_HZ).abs() < 1e-9);
            // Nothing accumulated, nothing to run
            assert_eq!(fs.advance(0.0), 0);
            assert_eq!(fs.advance(1.0 / TICK_RATE_HZ + 1e-4), 1);
        }
    }

    #[test]
    fn test_fixed_step_caps_substeps() {
        let mut fs = FixedStep::new(60.0, 4);
        // A long stall is clamped and capped
        assert_eq!(fs.advance(5.0), 4);
        // Backlog was dropped, so the next short frame does not burst
        assert!(fs.advance(0.0) <= 1);
        assert_eq!(fs.advance(f32::NAN), 0);
    }
}
