//! Bodies and the fixed-size body set
//!
//! A `BodySet` is built once and never grows or shrinks. Only the
//! simulation step gets mutable access to its bodies.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BALL_MASS;
use crate::error::{Error, Result};

/// A circular body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub pos: Vec2,
    /// Velocity in arena units per tick
    pub vel: Vec2,
    pub radius: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
    /// Display color (0xRRGGBB); physics never reads it
    #[serde(default)]
    pub color: u32,
}

fn default_mass() -> f32 {
    BALL_MASS
}

impl Body {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, mass: f32, color: u32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            mass,
            color,
        }
    }

    /// Body with the default mass and no color
    pub fn with_radius(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self::new(id, pos, vel, radius, BALL_MASS, 0xffffff)
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    /// Check radius/mass/position invariants
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidParam(format!(
                "body {} radius must be > 0, got {}",
                self.id, self.radius
            )));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(Error::InvalidParam(format!(
                "body {} mass must be > 0, got {}",
                self.id, self.mass
            )));
        }
        if !self.pos.is_finite() || !self.vel.is_finite() {
            return Err(Error::InvalidParam(format!(
                "body {} position and velocity must be finite",
                self.id
            )));
        }
        Ok(())
    }
}

/// Ordered, fixed-length collection of bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Body>", into = "Vec<Body>")]
pub struct BodySet {
    bodies: Vec<Body>,
}

impl BodySet {
    /// Validate and take ownership of the bodies, keeping their order
    pub fn new(bodies: Vec<Body>) -> Result<Self> {
        if bodies.is_empty() {
            return Err(Error::EmptyBodySet);
        }
        let mut seen = HashSet::with_capacity(bodies.len());
        for body in &bodies {
            body.validate()?;
            if !seen.insert(body.id) {
                return Err(Error::DuplicateBody(body.id));
            }
        }
        Ok(Self { bodies })
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn momentum(&self) -> Vec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }
}

impl<'a> IntoIterator for &'a BodySet {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<Body>> for BodySet {
    type Error = Error;

    fn try_from(bodies: Vec<Body>) -> Result<Self> {
        Self::new(bodies)
    }
}

impl From<BodySet> for Vec<Body> {
    fn from(set: BodySet) -> Self {
        set.bodies
    }
}
