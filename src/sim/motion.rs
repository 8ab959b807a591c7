//! Position integration and edge bounce
//!
//! Entities are squares addressed by their top-left corner. A bounce simply
//! inverts the velocity component on the tick the leading edge touches or
//! crosses a field edge: no sub-stepping and no penetration correction.

use glam::{BVec2, Vec2};

/// Advance one tick, then reverse any velocity component whose leading edge
/// reached a boundary. Returns which axes bounced.
pub fn step(pos: &mut Vec2, vel: &mut Vec2, size: f32, field: Vec2) -> BVec2 {
    *pos += *vel;

    let bounce_x = pos.x <= 0.0 || pos.x + size >= field.x;
    let bounce_y = pos.y <= 0.0 || pos.y + size >= field.y;

    if bounce_x {
        vel.x = -vel.x;
    }
    if bounce_y {
        vel.y = -vel.y;
    }

    BVec2::new(bounce_x, bounce_y)
}

/// Keep a square fully inside the field (player movement)
#[inline]
pub fn clamp_to_field(pos: Vec2, size: f32, field: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, (field - Vec2::splat(size)).max(Vec2::ZERO))
}
