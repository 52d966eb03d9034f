//! Scene presets that build the initial body set

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::body::Body;
use crate::error::{Error, Result};
use crate::settings::{ScenePreset, Settings};

/// Ball colors of the classic scene
pub const PALETTE: [u32; 6] = [0xff3333, 0x3333ff, 0x33ff33, 0xff9933, 0xffffff, 0xffff33];

/// Classic layout: (x, y, color)
const CLASSIC_LAYOUT: [(f32, f32, u32); 8] = [
    (100.0, 100.0, 0xff3333),
    (200.0, 200.0, 0x3333ff),
    (300.0, 300.0, 0x33ff33),
    (400.0, 400.0, 0xff9933),
    (500.0, 500.0, 0xffffff),
    (150.0, 150.0, 0xffff33),
    (350.0, 250.0, 0xffff33),
    (450.0, 350.0, 0xffff33),
];

/// Build the bodies for `settings.preset` inside `arena`
pub fn spawn_bodies(settings: &Settings, arena: &Arena, rng: &mut Pcg32) -> Result<Vec<Body>> {
    let radius = settings.ball_radius;
    if !arena.fits(radius) {
        return Err(Error::SceneDoesNotFit(format!(
            "ball radius {} does not fit a {}x{} arena",
            radius, arena.width, arena.height
        )));
    }

    let bodies = match settings.preset {
        ScenePreset::Classic => classic(settings, rng),
        ScenePreset::HeadOn => head_on(settings, arena),
        ScenePreset::Crowd => crowd(settings, arena, rng)?,
    };

    if let Some(b) = bodies.iter().find(|b| !arena.contains(b)) {
        return Err(Error::SceneDoesNotFit(format!(
            "{} body {} at ({}, {}) is outside a {}x{} arena",
            settings.preset.as_str(),
            b.id,
            b.pos.x,
            b.pos.y,
            arena.width,
            arena.height
        )));
    }

    Ok(bodies)
}

/// Random velocity with each component in [-max_speed/2, max_speed/2)
pub fn random_velocity(rng: &mut Pcg32, max_speed: f32) -> Vec2 {
    let half = max_speed * 0.5;
    if half <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(rng.random_range(-half..half), rng.random_range(-half..half))
}

fn classic(settings: &Settings, rng: &mut Pcg32) -> Vec<Body> {
    CLASSIC_LAYOUT
        .iter()
        .enumerate()
        .map(|(i, &(x, y, color))| {
            Body::new(
                i as u32,
                Vec2::new(x, y),
                random_velocity(rng, settings.max_speed),
                settings.ball_radius,
                settings.ball_mass,
                color,
            )
        })
        .collect()
}

fn head_on(settings: &Settings, arena: &Arena) -> Vec<Body> {
    let r = settings.ball_radius;
    let center = arena.center();
    let offset = Vec2::new(3.0 * r, 0.0);
    let vel = Vec2::new(settings.max_speed * 0.5, 0.0);

    vec![
        Body::new(0, center - offset, vel, r, settings.ball_mass, PALETTE[0]),
        Body::new(1, center + offset, -vel, r, settings.ball_mass, PALETTE[1]),
    ]
}

fn crowd(settings: &Settings, arena: &Arena, rng: &mut Pcg32) -> Result<Vec<Body>> {
    let r = settings.ball_radius;
    let cell = 2.5 * r;
    let cols = (arena.width / cell).floor() as u32;
    let rows = (arena.height / cell).floor() as u32;
    let count = settings.crowd_count;

    if cols == 0 || rows == 0 || cols.saturating_mul(rows) < count {
        return Err(Error::SceneDoesNotFit(format!(
            "{} balls of radius {} need more than a {}x{} grid",
            count, r, cols, rows
        )));
    }

    let bodies = (0..count)
        .map(|k| {
            let col = k % cols;
            let row = k / cols;
            let pos = Vec2::new(cell * (col as f32 + 0.5), cell * (row as f32 + 0.5));
            Body::new(
                k,
                pos,
                random_velocity(rng, settings.max_speed),
                r,
                settings.ball_mass,
                PALETTE[k as usize % PALETTE.len()],
            )
        })
        .collect();
    Ok(bodies)
}
