//! Movement input components.
//!
//! Input arrives whenever the host's input layer produces it, which is rarely
//! aligned with the fixed simulation tick. Handlers push events into an inbox
//! on [`MovementInput`]; the controller drains the inbox once at the start of
//! each tick and works from the resulting snapshot for the whole tick.

use bevy::prelude::*;

/// A single change reported by the host's input layer.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The 2D movement axis changed (x = strafe, y = forward).
    Direction(Vec2),
    /// The run button was pressed or released.
    Run(bool),
    /// The jump button was pressed or released.
    Jump(bool),
}

/// Bevy event carrying an [`InputEvent`] for one character.
///
/// Hosts that prefer messaging over direct component access can send these;
/// the controller routes them into the matching [`MovementInput`] inbox
/// before stepping.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LocomotionInput {
    /// The character receiving the input.
    pub entity: Entity,
    /// What changed.
    pub event: InputEvent,
}

impl LocomotionInput {
    /// Create an input event for `entity`.
    pub fn new(entity: Entity, event: InputEvent) -> Self {
        Self { entity, event }
    }
}

/// The input state the controller works from during one tick.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Latest movement axis.
    pub direction: Vec2,
    /// Whether run is held.
    pub run_held: bool,
    /// Whether jump is held.
    pub jump_held: bool,
    /// Whether a direction event was drained this tick.
    pub direction_changed: bool,
}

impl InputSnapshot {
    /// Whether the movement axis is deflected at all.
    #[inline]
    pub fn is_movement_pressed(&self) -> bool {
        self.direction.x != 0.0 || self.direction.y != 0.0
    }
}

/// Input inbox and latest known input state for a character.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use combo_locomotion::prelude::*;
///
/// let mut input = MovementInput::new();
/// input.on_direction_changed(Vec2::new(0.0, 1.0));
/// input.on_jump_changed(true);
///
/// // Nothing is visible until the controller drains the inbox.
/// assert!(!input.snapshot().jump_held);
///
/// let snapshot = input.drain();
/// assert!(snapshot.jump_held);
/// assert!(snapshot.is_movement_pressed());
/// ```
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct MovementInput {
    /// Events received since the last drain, oldest first.
    pending: Vec<InputEvent>,
    /// State as of the last drain.
    current: InputSnapshot,
}

impl MovementInput {
    /// Create an empty input with nothing pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change of the movement axis.
    pub fn on_direction_changed(&mut self, direction: Vec2) {
        self.push(InputEvent::Direction(direction));
    }

    /// Record a press or release of the run button.
    pub fn on_run_changed(&mut self, held: bool) {
        self.push(InputEvent::Run(held));
    }

    /// Record a press or release of the jump button.
    pub fn on_jump_changed(&mut self, held: bool) {
        self.push(InputEvent::Jump(held));
    }

    /// Queue an input event for the next tick.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Number of events waiting for the next tick.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// The snapshot taken at the last drain.
    pub fn snapshot(&self) -> InputSnapshot {
        self.current
    }

    /// Apply all queued events in arrival order and return the new snapshot.
    ///
    /// Later events win. `direction_changed` is set when at least one
    /// direction event was applied, even if it carried the same value.
    pub fn drain(&mut self) -> InputSnapshot {
        self.current.direction_changed = false;
        for event in self.pending.drain(..) {
            match event {
                InputEvent::Direction(direction) => {
                    self.current.direction = direction;
                    self.current.direction_changed = true;
                }
                InputEvent::Run(held) => self.current.run_held = held,
                InputEvent::Jump(held) => self.current.jump_held = held,
            }
        }
        self.current
    }
}
