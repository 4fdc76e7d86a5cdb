//! Locomotion state and marker components.
//!
//! [`LocomotionState`] is the controller's per-tick working state. The marker
//! components mirror its ground contact so gameplay code can filter queries
//! on them.

use bevy::prelude::*;

/// Candidate velocities and pressed flags for a character.
///
/// Two candidate vectors are kept in step: one at walk speed and one at run
/// speed. They share the same vertical component; only the horizontal part
/// differs. The mover receives whichever matches the run button.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct LocomotionState {
    /// World-space velocity at walk speed.
    pub walk_velocity: Vec3,
    /// World-space velocity at run speed.
    pub run_velocity: Vec3,
    /// Whether the movement axis is deflected.
    pub is_movement_pressed: bool,
    /// Whether run is held.
    pub is_run_pressed: bool,
    /// Ground contact as reported by the backend on the last tick.
    pub is_grounded: bool,
}

impl LocomotionState {
    /// Create a state at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// The velocity the mover receives this tick.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        if self.is_run_pressed {
            self.run_velocity
        } else {
            self.walk_velocity
        }
    }

    /// Shared vertical velocity.
    #[inline]
    pub fn vertical_velocity(&self) -> f32 {
        self.walk_velocity.y
    }

    /// Set the vertical component of both candidate vectors.
    #[inline]
    pub fn set_vertical_velocity(&mut self, vertical: f32) {
        self.walk_velocity.y = vertical;
        self.run_velocity.y = vertical;
    }

    /// Replace the horizontal components, keeping the vertical one.
    pub fn set_horizontal(&mut self, walk: Vec3, run: Vec3) {
        let vertical = self.vertical_velocity();
        self.walk_velocity = Vec3::new(walk.x, vertical, walk.z);
        self.run_velocity = Vec3::new(run.x, vertical, run.z);
    }

    /// Horizontal movement direction, used for facing.
    ///
    /// Taken from the walk candidate, or from the run candidate when the walk
    /// speed is zero.
    pub fn horizontal_direction(&self) -> Vec3 {
        let walk = Vec3::new(self.walk_velocity.x, 0.0, self.walk_velocity.z);
        if walk != Vec3::ZERO {
            return walk;
        }
        Vec3::new(self.run_velocity.x, 0.0, self.run_velocity.z)
    }
}

/// Marker component indicating the character is grounded.
///
/// Added when the backend reports ground contact. Removed when the character
/// becomes airborne.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use combo_locomotion::prelude::*;
///
/// // Grounded is a marker component - just use it in queries
/// fn check_grounded(grounded: Option<&Grounded>) -> bool {
///     grounded.is_some()
/// }
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Grounded;

/// Marker component indicating the character is airborne.
///
/// Mutually exclusive with [`Grounded`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Airborne;
