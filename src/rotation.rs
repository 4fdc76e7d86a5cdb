//! Heading smoothing.
//!
//! The character turns toward the direction it is moving in, easing in with a
//! fixed slerp factor per tick. Headings are yaw-only rotations with Bevy's
//! convention of `-Z` as forward.

use bevy::prelude::*;

/// Squared length below which a horizontal direction has no heading.
const MIN_DIRECTION_LENGTH_SQUARED: f32 = 1e-12;

/// Yaw rotation whose forward (`-Z`) axis points along the horizontal part
/// of `direction`.
///
/// Returns `None` when the horizontal part is zero-length.
pub fn facing(direction: Vec3) -> Option<Quat> {
    let horizontal = Vec3::new(direction.x, 0.0, direction.z);
    if horizontal.length_squared() <= MIN_DIRECTION_LENGTH_SQUARED {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-horizontal.x, -horizontal.z)))
}

/// Turn `current` toward the movement direction for one tick.
///
/// The slerp parameter is `dt * rotation_factor` and is deliberately not
/// clamped: a large `dt` or factor extrapolates past the target. When no
/// movement is pressed, or the movement has no horizontal part, the heading
/// is returned unchanged.
pub fn smooth_heading(
    current: Quat,
    movement: Vec3,
    movement_pressed: bool,
    rotation_factor: f32,
    dt: f32,
) -> Quat {
    if !movement_pressed {
        return current;
    }
    match facing(movement) {
        Some(target) => current.slerp(target, dt * rotation_factor),
        None => current,
    }
}
