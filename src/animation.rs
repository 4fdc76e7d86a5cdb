//! Animation parameter projection.
//!
//! The controller does not play animations. It derives a handful of
//! parameters from its state and writes them to an [`AnimationSink`], only
//! touching a parameter when its value actually changes.

use bevy::prelude::*;

/// Boolean animation parameters.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimBool {
    /// Movement input is deflected.
    IsWalking,
    /// Movement input is deflected and run is held.
    IsRunning,
    /// A jump is in the air.
    IsJumping,
}

impl AnimBool {
    /// Parameter name as used by animator graphs.
    pub fn name(self) -> &'static str {
        match self {
            AnimBool::IsWalking => "isWalking",
            AnimBool::IsRunning => "isRunning",
            AnimBool::IsJumping => "isJumping",
        }
    }
}

/// Integer animation parameters.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimInt {
    /// Tier of the current or last jump of the combo.
    JumpCount,
}

impl AnimInt {
    /// Parameter name as used by animator graphs.
    pub fn name(self) -> &'static str {
        match self {
            AnimInt::JumpCount => "jumpCount",
        }
    }
}

/// Destination for animation parameters.
///
/// Reads return the last value the sink holds, which the projector compares
/// against before writing.
pub trait AnimationSink {
    /// Last known value of a boolean parameter.
    fn bool_param(&self, param: AnimBool) -> bool;

    /// Write a boolean parameter.
    fn set_bool(&mut self, param: AnimBool, value: bool);

    /// Last known value of an integer parameter.
    fn int_param(&self, param: AnimInt) -> i32;

    /// Write an integer parameter.
    fn set_int(&mut self, param: AnimInt, value: i32);
}

/// Animation parameters derived from one tick of controller state.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationParams {
    pub is_walking: bool,
    pub is_running: bool,
    pub is_jumping: bool,
    pub jump_count: i32,
}

impl AnimationParams {
    /// Project controller state onto animation parameters.
    pub fn project(
        movement_pressed: bool,
        run_pressed: bool,
        jump_animating: bool,
        jump_count: u8,
    ) -> Self {
        Self {
            is_walking: movement_pressed,
            is_running: movement_pressed && run_pressed,
            is_jumping: jump_animating,
            jump_count: i32::from(jump_count),
        }
    }

    /// Write every parameter that differs from the sink's current value.
    ///
    /// Returns the number of writes issued.
    pub fn write_changes(&self, sink: &mut impl AnimationSink) -> usize {
        let mut writes = 0;
        for (param, value) in [
            (AnimBool::IsWalking, self.is_walking),
            (AnimBool::IsRunning, self.is_running),
            (AnimBool::IsJumping, self.is_jumping),
        ] {
            if sink.bool_param(param) != value {
                sink.set_bool(param, value);
                writes += 1;
            }
        }
        if sink.int_param(AnimInt::JumpCount) != self.jump_count {
            sink.set_int(AnimInt::JumpCount, self.jump_count);
            writes += 1;
        }
        writes
    }
}

/// Animation parameters as seen by the host's animation layer.
///
/// This is the sink the ECS systems write to. Because values are only
/// written when they change, `Changed<AnimatorParameters>` fires exactly on
/// real parameter changes.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Component)]
pub struct AnimatorParameters {
    pub is_walking: bool,
    pub is_running: bool,
    pub is_jumping: bool,
    pub jump_count: i32,
}

impl AnimationSink for AnimatorParameters {
    fn bool_param(&self, param: AnimBool) -> bool {
        match param {
            AnimBool::IsWalking => self.is_walking,
            AnimBool::IsRunning => self.is_running,
            AnimBool::IsJumping => self.is_jumping,
        }
    }

    fn set_bool(&mut self, param: AnimBool, value: bool) {
        match param {
            AnimBool::IsWalking => self.is_walking = value,
            AnimBool::IsRunning => self.is_running = value,
            AnimBool::IsJumping => self.is_jumping = value,
        }
    }

    fn int_param(&self, param: AnimInt) -> i32 {
        match param {
            AnimInt::JumpCount => self.jump_count,
        }
    }

    fn set_int(&mut self, param: AnimInt, value: i32) {
        match param {
            AnimInt::JumpCount => self.jump_count = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that records every write it receives.
    #[derive(Default)]
    struct RecordingSink {
        params: AnimatorParameters,
        writes: Vec<(&'static str, i32)>,
    }

    impl AnimationSink for RecordingSink {
        fn bool_param(&self, param: AnimBool) -> bool {
            self.params.bool_param(param)
        }

        fn set_bool(&mut self, param: AnimBool, value: bool) {
            self.writes.push((param.name(), i32::from(value)));
            self.params.set_bool(param, value);
        }

        fn int_param(&self, param: AnimInt) -> i32 {
            self.params.int_param(param)
        }

        fn set_int(&mut self, param: AnimInt, value: i32) {
            self.writes.push((param.name(), value));
            self.params.set_int(param, value);
        }
    }

    #[test]
    fn walking_follows_movement() {
        let params = AnimationParams::project(true, false, false, 0);
        assert!(params.is_walking);
        assert!(!params.is_running);
    }

    #[test]
    fn running_needs_movement_and_run() {
        assert!(AnimationParams::project(true, true, false, 0).is_running);
        assert!(!AnimationParams::project(false, true, false, 0).is_running);
        assert!(!AnimationParams::project(true, false, false, 0).is_running);
    }

    #[test]
    fn jump_fields_pass_through() {
        let params = AnimationParams::project(false, false, true, 2);
        assert!(params.is_jumping);
        assert_eq!(params.jump_count, 2);
    }

    #[test]
    fn walking_writes_only_on_change() {
        let mut sink = RecordingSink::default();
        for pressed in [true, true, false] {
            AnimationParams::project(pressed, false, false, 0).write_changes(&mut sink);
        }
        assert_eq!(sink.writes, vec![("isWalking", 1), ("isWalking", 0)]);
    }

    #[test]
    fn unchanged_params_issue_no_writes() {
        let mut sink = RecordingSink::default();
        let params = AnimationParams::project(true, true, true, 3);
        assert_eq!(params.write_changes(&mut sink), 4);
        assert_eq!(params.write_changes(&mut sink), 0);
        assert_eq!(sink.writes.len(), 4);
    }

    #[test]
    fn jump_count_written_as_int() {
        let mut sink = RecordingSink::default();
        AnimationParams::project(false, false, true, 1).write_changes(&mut sink);
        AnimationParams::project(false, false, true, 2).write_changes(&mut sink);
        assert_eq!(
            sink.writes,
            vec![("isJumping", 1), ("jumpCount", 1), ("jumpCount", 2)]
        );
    }

    #[test]
    fn animator_parameters_round_trip_through_sink() {
        let mut animator = AnimatorParameters::default();
        animator.set_bool(AnimBool::IsRunning, true);
        animator.set_int(AnimInt::JumpCount, 3);
        assert!(animator.bool_param(AnimBool::IsRunning));
        assert!(!animator.bool_param(AnimBool::IsWalking));
        assert_eq!(animator.int_param(AnimInt::JumpCount), 3);
    }

    #[test]
    fn parameter_names() {
        assert_eq!(AnimBool::IsWalking.name(), "isWalking");
        assert_eq!(AnimBool::IsRunning.name(), "isRunning");
        assert_eq!(AnimBool::IsJumping.name(), "isJumping");
        assert_eq!(AnimInt::JumpCount.name(), "jumpCount");
    }
}
