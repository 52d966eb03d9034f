//! Axis-aligned rectangular arena
//!
//! The arena spans `[0, width] x [0, height]` in the same units as body
//! positions (canvas pixels in the browser build).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    /// Create an arena; both dimensions must be finite and positive
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::InvalidParam(format!(
                "arena width must be > 0, got {width}"
            )));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(Error::InvalidParam(format!(
                "arena height must be > 0, got {height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Dimensions as a vector (width, height)
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Whether a body of this radius can sit inside the arena at all
    pub fn fits(&self, radius: f32) -> bool {
        2.0 * radius <= self.width && 2.0 * radius <= self.height
    }

    /// True if the body's full radius lies inside the arena
    pub fn contains(&self, body: &Body) -> bool {
        let r = body.radius;
        body.pos.x >= r
            && body.pos.x <= self.width - r
            && body.pos.y >= r
            && body.pos.y <= self.height - r
    }

    /// Clamp a centre position so a circle of `radius` stays inside.
    ///
    /// Idempotent. An axis narrower than the body pins it to the middle.
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, radius, self.width),
            clamp_axis(pos.y, radius, self.height),
        )
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: crate::consts::ARENA_WIDTH,
            height: crate::consts::ARENA_HEIGHT,
        }
    }
}

/// `f32::clamp` panics when min > max, so oversize bodies are centred instead
#[inline]
fn clamp_axis(value: f32, radius: f32, extent: f32) -> f32 {
    let lo = radius;
    let hi = extent - radius;
    if lo > hi {
        extent * 0.5
    } else {
        value.clamp(lo, hi)
    }
}
