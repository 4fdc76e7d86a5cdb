//! # `combo_locomotion`
//!
//! A kinematic 3D character locomotion controller with a chainable
//! triple-jump combo and physics backend abstraction.
//!
//! This crate provides a character controller that:
//! - Turns a 2D movement axis plus run/jump buttons into a per-tick velocity
//! - Chains up to three jumps, each higher and longer than the last
//! - Resets the combo when the player waits too long after landing
//! - Applies heavier gravity on the way down and when jump is released early
//! - Eases the character's heading toward its movement direction
//! - Publishes walking/running/jumping animation parameters on change only
//! - Abstracts the physics backend (Rapier3D included behind `rapier3d`)
//!
//! ## Architecture
//!
//! Each fixed tick runs one pass of the orchestrator in [`tick`]:
//! 1. Input events queued since the last tick are drained into a snapshot
//! 2. The heading turns toward the movement direction
//! 3. Animation parameters are projected from the previous tick's state
//! 4. The backend is asked to move the character
//! 5. Ground contact is polled and vertical velocity integrated
//! 6. Jump input is evaluated against the combo state machine
//!
//! The combo decay is a deadline on a simulation clock, not a timer task.
//!
//! ## Usage
//!
//! ```rust
//! use bevy::prelude::*;
//! use combo_locomotion::prelude::*;
//!
//! // The config pulls in input, state and animation components.
//! let config = LocomotionConfig::archer();
//! let mut input = MovementInput::new();
//! input.on_direction_changed(Vec2::Y);
//! input.on_jump_changed(true);
//!
//! // These can be spawned together with your physics backend's components
//! ```

use bevy::prelude::*;

pub mod animation;
pub mod backend;
pub mod combo;
pub mod config;
pub mod gravity;
pub mod input;
pub mod rotation;
pub mod state;
pub mod systems;
pub mod tick;
pub mod tiers;

#[cfg(feature = "rapier3d")]
pub mod rapier;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::animation::{AnimBool, AnimInt, AnimationParams, AnimationSink, AnimatorParameters};
    pub use crate::backend::{LocomotionBackend, NoOpBackendPlugin};
    pub use crate::combo::{JumpState, JumpTransition, Landing};
    pub use crate::config::{ConfigError, LocomotionConfig};
    pub use crate::input::{InputEvent, InputSnapshot, LocomotionInput, MovementInput};
    pub use crate::state::{Airborne, Grounded, LocomotionState};
    pub use crate::systems::SimulationClock;
    pub use crate::tick::{Character, CharacterHost, TickReport};
    pub use crate::tiers::JumpTierTable;
    pub use crate::ComboLocomotionPlugin;

    #[cfg(feature = "rapier3d")]
    pub use crate::rapier::{Rapier3dBackend, Rapier3dBackendPlugin, Rapier3dCharacterBundle, Rapier3dMover};
}

/// Main plugin for the locomotion controller.
///
/// This plugin is generic over a physics backend `B` which provides ground
/// contact and kinematic movement.
///
/// # Type Parameters
/// - `B`: The physics backend implementation (e.g., `Rapier3dBackend`)
///
/// # Examples
///
/// With Rapier3D backend:
/// ```rust,ignore
/// use bevy::prelude::*;
/// use bevy_rapier3d::prelude::*;
/// use combo_locomotion::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
///     .add_plugins(ComboLocomotionPlugin::<Rapier3dBackend>::default())
///     .run();
/// ```
pub struct ComboLocomotionPlugin<B: backend::LocomotionBackend> {
    _marker: std::marker::PhantomData<B>,
}

impl<B: backend::LocomotionBackend> Default for ComboLocomotionPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: backend::LocomotionBackend> Plugin for ComboLocomotionPlugin<B> {
    fn build(&self, app: &mut App) {
        // Register core types
        app.register_type::<config::LocomotionConfig>();
        app.register_type::<input::MovementInput>();
        app.register_type::<state::LocomotionState>();
        app.register_type::<state::Grounded>();
        app.register_type::<state::Airborne>();
        app.register_type::<combo::JumpState>();
        app.register_type::<tiers::JumpTierTable>();
        app.register_type::<animation::AnimatorParameters>();
        app.register_type::<systems::SimulationClock>();

        app.add_event::<input::LocomotionInput>();
        app.init_resource::<systems::SimulationClock>();

        // Add the physics backend plugin
        app.add_plugins(B::plugin());

        // Add core systems in FixedUpdate for consistent jump arcs
        app.add_systems(
            FixedUpdate,
            (
                systems::init_jump_tiers,
                systems::route_input_events,
                systems::step_characters::<B>,
                systems::sync_state_markers,
            )
                .chain(),
        );
    }
}
