//! Text renderer for headless runs

use log::{Level, debug, log_enabled, trace};

use super::Renderer;
use crate::css_color;
use crate::error::Result;
use crate::sim::SimState;

/// Logs a summary line every `every_n` frames, plus one line per body at
/// trace level.
#[derive(Debug, Clone)]
pub struct LogRenderer {
    every_n: u64,
    frames: u64,
}

impl LogRenderer {
    pub fn new(every_n: u64) -> Self {
        Self {
            every_n: every_n.max(1),
            frames: 0,
        }
    }

    /// Frames handed to this renderer so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &SimState) -> Result<()> {
        let frame = self.frames;
        self.frames += 1;
        if frame % self.every_n != 0 {
            return Ok(());
        }

        debug!(
            "frame {} tick {}: {} bodies, KE {:.4}, p ({:.4}, {:.4})",
            frame,
            state.time_ticks,
            state.bodies.len(),
            state.kinetic_energy(),
            state.momentum().x,
            state.momentum().y
        );
        if log_enabled!(Level::Trace) {
            for b in &state.bodies {
                trace!(
                    "  body {} {} at ({:.2}, {:.2}) r {} v ({:.3}, {:.3})",
                    b.id,
                    css_color(b.color),
                    b.pos.x,
                    b.pos.y,
                    b.radius,
                    b.vel.x,
                    b.vel.y
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_counts_frames() {
        let settings = Settings {
            seed: Some(3),
            ..Settings::default()
        };
        let state = SimState::from_settings(&settings).unwrap();
        let mut r = LogRenderer::new(0);
        for _ in 0..5 {
            r.render(&state).unwrap();
        }
        assert_eq!(r.frames(), 5);
    }
}
