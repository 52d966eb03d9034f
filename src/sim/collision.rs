//! Collision detection and response
//!
//! Two kinds of contact: a body against the arena walls, and a pair of
//! bodies against each other. Pair response is the equal-restitution 2D
//! elastic impulse along the line of centres; overlap depth is not
//! corrected.

use glam::Vec2;

use super::arena::Arena;
use super::body::Body;
use crate::consts::CONTACT_EPSILON;

/// Outcome of checking one ordered pair of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// Circles do not overlap
    Apart,
    /// Centres coincide; no usable normal, so the pair is skipped this tick
    Degenerate,
    /// Overlapping but not approaching (closing speed >= 0)
    Separating,
    /// Overlapping and approaching; impulse magnitude `j` was applied
    Impulse { j: f32 },
}

impl PairOutcome {
    pub fn hit(&self) -> bool {
        matches!(self, PairOutcome::Impulse { .. })
    }
}

/// Reflect the velocity components that carry the body past a wall.
///
/// A wall is hit when the body's leading edge touches or exceeds it. The
/// component is only flipped while it points out of the arena, so a body
/// that is already heading back in keeps its velocity. (A body outside the
/// arena but moving inward is deliberately not inverted, unlike a plain
/// sign flip.)
/// Returns true if any component was reflected.
pub fn bounce_walls(body: &mut Body, arena: &Arena) -> bool {
    let r = body.radius;
    let mut bounced = false;

    if (body.pos.x - r <= 0.0 && body.vel.x < 0.0)
        || (body.pos.x + r >= arena.width && body.vel.x > 0.0)
    {
        body.vel.x = -body.vel.x;
        bounced = true;
    }
    if (body.pos.y - r <= 0.0 && body.vel.y < 0.0)
        || (body.pos.y + r >= arena.height && body.vel.y > 0.0)
    {
        body.vel.y = -body.vel.y;
        bounced = true;
    }

    bounced
}

/// Keep the body's full radius inside the arena
#[inline]
pub fn clamp_to_arena(body: &mut Body, arena: &Arena) {
    body.pos = arena.clamp(body.pos, body.radius);
}

/// Relative velocity of `other` with respect to `body`, projected onto the
/// unit normal pointing from `body` to `other`. Negative means approaching.
#[inline]
pub fn closing_speed(body: &Body, other: &Body, normal: Vec2) -> f32 {
    (other.vel - body.vel).dot(normal)
}

/// Unit normal from `a` to `b`. Pairs that do not overlap, or whose centres
/// (nearly) coincide, come back as the outcome that ends the check.
fn contact_normal(a: &Body, b: &Body) -> Result<Vec2, PairOutcome> {
    let delta = b.pos - a.pos;
    let distance = delta.length();

    if distance >= a.radius + b.radius {
        return Err(PairOutcome::Apart);
    }
    if distance < CONTACT_EPSILON || distance.is_nan() {
        return Err(PairOutcome::Degenerate);
    }
    Ok(delta / distance)
}

/// Resolve one ordered pair.
///
/// `body` receives `+j * other.mass * n` and `other` receives
/// `-j * body.mass * n`, with `j = 2 * closing_speed / (m_body + m_other)`.
/// For a head-on hit between equal masses this swaps the normal components.
pub fn resolve_pair(body: &mut Body, other: &mut Body) -> PairOutcome {
    let normal = match contact_normal(body, other) {
        Ok(n) => n,
        Err(outcome) => return outcome,
    };

    let speed = closing_speed(body, other, normal);
    if speed >= 0.0 {
        return PairOutcome::Separating;
    }

    let j = 2.0 * speed / (body.mass + other.mass);
    body.vel += normal * (j * other.mass);
    other.vel -= normal * (j * body.mass);

    PairOutcome::Impulse { j }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(x: f32, y: f32, dx: f32, dy: f32) -> Body {
        Body::with_radius(0, Vec2::new(x, y), Vec2::new(dx, dy), 20.0)
    }

    #[test]
    fn test_head_on_equal_mass_swaps_velocities() {
        let mut a = ball(90.0, 100.0, 2.0, 0.0);
        let mut b = ball(110.0, 100.0, -2.0, 0.0);

        let outcome = resolve_pair(&mut a, &mut b);
        assert!(outcome.hit());
        assert!((a.vel.x - (-2.0)).abs() < 1e-5);
        assert!((b.vel.x - 2.0).abs() < 1e-5);
        assert!(a.vel.y.abs() < 1e-6 && b.vel.y.abs() < 1e-6);
    }

    #[test]
    fn test_second_visit_is_separating() {
        let mut a = ball(90.0, 100.0, 2.0, 0.0);
        let mut b = ball(110.0, 100.0, -2.0, 0.0);
        resolve_pair(&mut a, &mut b);

        let (va, vb) = (a.vel, b.vel);
        assert_eq!(resolve_pair(&mut b, &mut a), PairOutcome::Separating);
        assert_eq!(a.vel, va);
        assert_eq!(b.vel, vb);
    }

    #[test]
    fn test_apart_bodies_untouched() {
        let mut a = ball(0.0, 0.0, 5.0, 0.0);
        let mut b = ball(40.0, 0.0, -5.0, 0.0);
        // Exactly touching is not overlapping
        assert_eq!(resolve_pair(&mut a, &mut b), PairOutcome::Apart);
        assert_eq!(a.vel.x, 5.0);
        assert_eq!(b.vel.x, -5.0);
    }

    #[test]
    fn test_coincident_centres_skipped() {
        let mut a = ball(100.0, 100.0, 1.0, 0.0);
        let mut b = ball(100.0, 100.0, -1.0, 0.0);
        assert_eq!(resolve_pair(&mut a, &mut b), PairOutcome::Degenerate);
        assert!(a.vel.is_finite() && b.vel.is_finite());
        assert_eq!(a.vel.x, 1.0);
    }

    #[test]
    fn test_unequal_masses_conserve_momentum_and_energy() {
        let mut a = Body::new(0, Vec2::new(0.0, 0.0), Vec2::new(3.0, 1.0), 10.0, 3.0, 0);
        let mut b = Body::new(1, Vec2::new(12.0, 5.0), Vec2::new(-1.0, 0.5), 10.0, 1.0, 0);
        let p0 = a.momentum() + b.momentum();
        let e0 = a.kinetic_energy() + b.kinetic_energy();

        assert!(resolve_pair(&mut a, &mut b).hit());

        let p1 = a.momentum() + b.momentum();
        let e1 = a.kinetic_energy() + b.kinetic_energy();
        assert!((p1 - p0).length() < 1e-4);
        assert!((e1 - e0).abs() < 1e-4);
    }

    #[test]
    fn test_wall_bounce_flips_outward_component() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let mut b = ball(-5.0, 300.0, -3.0, 1.0);
        assert!(bounce_walls(&mut b, &arena));
        assert_eq!(b.vel, Vec2::new(3.0, 1.0));

        let mut b = ball(790.0, 595.0, 2.0, 4.0);
        assert!(bounce_walls(&mut b, &arena));
        assert_eq!(b.vel, Vec2::new(-2.0, -4.0));
    }

    #[test]
    fn test_wall_bounce_leaves_inbound_body_alone() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        // Outside the left wall but already moving back in
        let mut b = ball(-5.0, 300.0, 3.0, 0.0);
        assert!(!bounce_walls(&mut b, &arena));
        assert_eq!(b.vel.x, 3.0);

        let mut b = ball(400.0, 300.0, -3.0, 3.0);
        assert!(!bounce_walls(&mut b, &arena));
    }
}
