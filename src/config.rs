//! Locomotion configuration component.
//!
//! This module defines the construction-time tuning for a combo-jumping
//! character: movement speeds, jump limits, grounded gravity, heading
//! smoothing and the combo decay window.

use bevy::prelude::*;
use thiserror::Error;

use crate::animation::AnimatorParameters;
use crate::combo::JumpState;
use crate::input::MovementInput;
use crate::state::LocomotionState;

/// Reasons a [`LocomotionConfig`] cannot drive a character.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The apex height of the first jump must be a positive, finite number.
    #[error("max jump height must be positive and finite, got {0}")]
    InvalidJumpHeight(f32),
    /// The duration of the first jump must be a positive, finite number.
    #[error("max jump time must be positive and finite, got {0}")]
    InvalidJumpTime(f32),
    /// The combo decay window cannot be negative.
    #[error("decay window must be non-negative and finite, got {0}")]
    InvalidDecayWindow(f32),
    /// Walk and run speeds must be finite.
    #[error("movement speeds must be finite (walk {walk}, run {run})")]
    InvalidSpeed { walk: f32, run: f32 },
    /// Grounded gravity must be finite.
    #[error("grounded gravity must be finite, got {0}")]
    InvalidGroundedGravity(f32),
    /// The heading smoothing factor must be non-negative and finite.
    #[error("rotation factor must be non-negative and finite, got {0}")]
    InvalidRotationFactor(f32),
}

/// Configuration parameters for a combo-jumping character.
///
/// Values are read once when the character is set up; the jump tier table is
/// derived from them at that point and never re-derived mid-flight.
///
/// Spawning this component is enough to get a complete character: the
/// input, state and animation components are required components.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
#[require(MovementInput, LocomotionState, JumpState, AnimatorParameters, Transform)]
pub struct LocomotionConfig {
    // === Movement Settings ===
    /// Multiplier applied to the input direction while walking (units/second).
    pub walk_speed: f32,

    /// Multiplier applied to the input direction while run is held (units/second).
    pub run_speed: f32,

    // === Jump Settings ===
    /// Apex height of the first jump of a combo (world units).
    pub max_jump_height: f32,

    /// Total airtime of the first jump of a combo (seconds).
    /// The time to apex is half of this.
    pub max_jump_time: f32,

    /// Vertical velocity held while grounded.
    ///
    /// Slightly negative so the mover keeps pressing into the floor and
    /// ground contact does not flicker.
    pub grounded_gravity: f32,

    /// Time after landing during which another jump continues the combo.
    pub decay_window: f32,

    // === Heading Settings ===
    /// Heading slerp speed. The interpolation parameter per tick is
    /// `dt * rotation_factor_per_frame` and is not clamped.
    pub rotation_factor_per_frame: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            // Movement settings
            walk_speed: 1.0,
            run_speed: 5.0,

            // Jump settings
            max_jump_height: 2.0,
            max_jump_time: 0.75,
            grounded_gravity: -0.05,
            decay_window: 0.5,

            // Heading settings
            rotation_factor_per_frame: 15.0,
        }
    }
}

impl LocomotionConfig {
    /// Create a config with the default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tuning of the archer character the combo was designed around.
    pub fn archer() -> Self {
        Self::default()
    }

    /// Lower, longer jumps with a more forgiving combo window.
    pub fn floaty() -> Self {
        Self {
            max_jump_height: 1.5,
            max_jump_time: 1.1,
            decay_window: 0.8,
            rotation_factor_per_frame: 8.0,
            ..default()
        }
    }

    /// Time from launch to apex of the first jump.
    #[inline]
    pub fn time_to_apex(&self) -> f32 {
        self.max_jump_time / 2.0
    }

    /// Check that the config describes a playable character.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_jump_height.is_finite() && self.max_jump_height > 0.0) {
            return Err(ConfigError::InvalidJumpHeight(self.max_jump_height));
        }
        if !(self.max_jump_time.is_finite() && self.max_jump_time > 0.0) {
            return Err(ConfigError::InvalidJumpTime(self.max_jump_time));
        }
        if !(self.decay_window.is_finite() && self.decay_window >= 0.0) {
            return Err(ConfigError::InvalidDecayWindow(self.decay_window));
        }
        if !(self.walk_speed.is_finite() && self.run_speed.is_finite()) {
            return Err(ConfigError::InvalidSpeed {
                walk: self.walk_speed,
                run: self.run_speed,
            });
        }
        if !self.grounded_gravity.is_finite() {
            return Err(ConfigError::InvalidGroundedGravity(self.grounded_gravity));
        }
        if !(self.rotation_factor_per_frame.is_finite() && self.rotation_factor_per_frame >= 0.0) {
            return Err(ConfigError::InvalidRotationFactor(
                self.rotation_factor_per_frame,
            ));
        }
        Ok(())
    }

    /// Builder: set walk and run speeds.
    pub fn with_speeds(mut self, walk: f32, run: f32) -> Self {
        self.walk_speed = walk;
        self.run_speed = run;
        self
    }

    /// Builder: set run speed.
    pub fn with_run_speed(mut self, speed: f32) -> Self {
        self.run_speed = speed;
        self
    }

    /// Builder: set the first jump's apex height and total airtime.
    pub fn with_jump(mut self, max_height: f32, max_time: f32) -> Self {
        self.max_jump_height = max_height;
        self.max_jump_time = max_time;
        self
    }

    /// Builder: set grounded gravity.
    pub fn with_grounded_gravity(mut self, gravity: f32) -> Self {
        self.grounded_gravity = gravity;
        self
    }

    /// Builder: set the combo decay window.
    pub fn with_decay_window(mut self, window: f32) -> Self {
        self.decay_window = window;
        self
    }

    /// Builder: set heading slerp speed.
    pub fn with_rotation_factor(mut self, factor: f32) -> Self {
        self.rotation_factor_per_frame = factor;
        self
    }
}
