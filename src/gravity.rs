//! Vertical velocity integration.
//!
//! Velocity is advanced with the average of the old and the Euler-stepped new
//! value. The averaging smooths the arc where gravity changes between tiers
//! and is part of how the jumps feel, so it must not be collapsed into a plain
//! Euler step.

/// Gravity scale while descending or after jump is released.
pub const FALL_MULTIPLIER: f32 = 2.0;

/// Whether an airborne character is treated as falling.
///
/// Releasing jump early counts as falling, which cuts the jump short.
#[inline]
pub fn is_falling(vertical_velocity: f32, jump_held: bool) -> bool {
    vertical_velocity <= 0.0 || !jump_held
}

/// Advance an airborne character's vertical velocity by one tick.
///
/// `gravity` is the (negative) gravity of the current jump tier.
#[inline]
pub fn integrate_airborne(vertical_velocity: f32, gravity: f32, jump_held: bool, dt: f32) -> f32 {
    let multiplier = if is_falling(vertical_velocity, jump_held) {
        FALL_MULTIPLIER
    } else {
        1.0
    };
    let stepped = vertical_velocity + gravity * dt * multiplier;
    (vertical_velocity + stepped) * 0.5
}

/// Vertical velocity for the next tick.
///
/// Grounded characters are pinned to `grounded_gravity` regardless of `dt`;
/// airborne ones go through [`integrate_airborne`].
#[inline]
pub fn next_vertical_velocity(
    vertical_velocity: f32,
    grounded: bool,
    grounded_gravity: f32,
    gravity: f32,
    jump_held: bool,
    dt: f32,
) -> f32 {
    if grounded {
        grounded_gravity
    } else {
        integrate_airborne(vertical_velocity, gravity, jump_held, dt)
    }
}
