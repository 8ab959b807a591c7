//! Random placement of new entities
//!
//! Positions come from rejection sampling against a minimum distance to the
//! player. The attempt ceiling keeps a crowded field from looping forever: once
//! it is reached the last candidate is accepted as-is.

use glam::Vec2;
use rand::Rng;

use super::collision::within_radius;
use crate::consts::GLITCH_PALETTE;

/// Uniform top-left corner such that a square of `size` fits in the field
pub fn random_position(rng: &mut impl Rng, field: Vec2, size: f32) -> Vec2 {
    let span = (field - Vec2::splat(size)).max(Vec2::ZERO);
    Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y)
}

/// Position whose center is farther than `min_distance` from `avoid`,
/// best effort within `attempts` draws
pub fn safe_position(
    rng: &mut impl Rng,
    field: Vec2,
    size: f32,
    avoid: Vec2,
    min_distance: f32,
    attempts: u32,
) -> Vec2 {
    let half = Vec2::splat(size / 2.0);
    let mut candidate = random_position(rng, field, size);
    for _ in 1..attempts.max(1) {
        if !within_radius(avoid, candidate + half, min_distance) {
            return candidate;
        }
        candidate = random_position(rng, field, size);
    }
    candidate
}

/// Velocity with both components uniform in [-speed, speed)
pub fn random_velocity(rng: &mut impl Rng, speed: f32) -> Vec2 {
    Vec2::new(
        (rng.random::<f32>() - 0.5) * 2.0 * speed,
        (rng.random::<f32>() - 0.5) * 2.0 * speed,
    )
}

/// Cosmetic palette pick
pub fn pick_color(rng: &mut impl Rng) -> u32 {
    GLITCH_PALETTE[rng.random_range(0..GLITCH_PALETTE.len())]
}
