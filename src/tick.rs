//! Per-tick orchestration.
//!
//! One call to [`Character::tick`] is one simulation step:
//!
//! 1. expire the combo decay against the simulation clock
//! 2. drain the input inbox
//! 3. refresh the horizontal candidate vectors from a new input direction
//! 4. turn the heading toward the movement direction
//! 5. project animation parameters
//! 6. move by the run or walk vector
//! 7. poll ground contact and integrate vertical velocity
//! 8. evaluate jump input
//!
//! Heading and animation see the vertical state of the previous tick. Jump
//! input is evaluated after gravity so a landing can relaunch on the same
//! tick.

use bevy::prelude::*;

use crate::animation::{AnimationParams, AnimationSink};
use crate::combo::{JumpState, JumpTransition, Landing};
use crate::config::LocomotionConfig;
use crate::gravity;
use crate::input::MovementInput;
use crate::rotation;
use crate::state::LocomotionState;
use crate::tiers::JumpTierTable;

/// Fraction of the tier's launch velocity applied when a jump starts.
pub const LAUNCH_VELOCITY_SCALE: f32 = 0.5;

/// Physics services the controller drives but does not own.
pub trait CharacterHost {
    /// Whether the character is touching the ground.
    fn is_grounded(&self) -> bool;

    /// Move the character by `velocity * dt`, resolving collisions.
    fn move_by(&mut self, velocity: Vec3, dt: f32);
}

/// What happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Whether the combo decayed at the start of the tick.
    pub decayed: bool,
    /// Landing processed this tick, if any.
    pub landing: Option<Landing>,
    /// Jump transition evaluated at the end of the tick.
    pub transition: JumpTransition,
    /// Number of animation parameter writes issued.
    pub animation_writes: usize,
}

/// Borrowed view of everything one character needs to step.
pub struct Character<'a> {
    pub config: &'a LocomotionConfig,
    pub tiers: &'a JumpTierTable,
    pub input: &'a mut MovementInput,
    pub locomotion: &'a mut LocomotionState,
    pub jump: &'a mut JumpState,
    pub heading: &'a mut Quat,
}

impl Character<'_> {
    /// Advance the character by one tick of `dt` seconds ending at `now`.
    pub fn tick(
        &mut self,
        host: &mut impl CharacterHost,
        sink: &mut impl AnimationSink,
        dt: f32,
        now: f64,
    ) -> TickReport {
        let decayed = self.jump.expire_decay(now);

        let input = self.input.drain();
        self.locomotion.is_movement_pressed = input.is_movement_pressed();
        self.locomotion.is_run_pressed = input.run_held;
        if input.direction_changed {
            self.refresh_horizontal(input.direction);
        }

        *self.heading = rotation::smooth_heading(
            *self.heading,
            self.locomotion.horizontal_direction(),
            self.locomotion.is_movement_pressed,
            self.config.rotation_factor_per_frame,
            dt,
        );

        let animation_writes = AnimationParams::project(
            self.locomotion.is_movement_pressed,
            self.locomotion.is_run_pressed,
            self.jump.is_jump_animating(),
            self.jump.jump_count(),
        )
        .write_changes(sink);

        host.move_by(self.locomotion.velocity(), dt);

        let grounded = host.is_grounded();
        self.locomotion.is_grounded = grounded;
        let landing = if grounded {
            self.jump.touch_ground(now, self.config.decay_window)
        } else {
            None
        };
        let vertical = gravity::next_vertical_velocity(
            self.locomotion.vertical_velocity(),
            grounded,
            self.config.grounded_gravity,
            self.tiers.gravity(self.jump.jump_count()),
            input.jump_held,
            dt,
        );
        self.locomotion.set_vertical_velocity(vertical);

        let transition = self.jump.evaluate(grounded, input.jump_held);
        if let JumpTransition::Started { tier } = transition {
            let launch = self.tiers.initial_velocity(tier) * LAUNCH_VELOCITY_SCALE;
            self.locomotion.set_vertical_velocity(launch);
            debug!(tier, launch, "jump started");
        }

        trace!(
            velocity = ?self.locomotion.velocity(),
            grounded,
            jump_count = self.jump.jump_count(),
            "locomotion tick"
        );

        TickReport {
            decayed,
            landing,
            transition,
            animation_writes,
        }
    }

    /// Recompute the horizontal candidates from the input axis.
    ///
    /// The axis is in character space (y forward) and is turned into world
    /// space with the heading at the moment the input changed.
    fn refresh_horizontal(&mut self, direction: Vec2) {
        let local = Vec3::new(direction.x, 0.0, -direction.y);
        let world = *self.heading * local;
        self.locomotion.set_horizontal(
            world * self.config.walk_speed,
            world * self.config.run_speed,
        );
    }
}
