//! Core controller systems.
//!
//! These systems wire the per-tick orchestrator into Bevy's `FixedUpdate`
//! schedule. They are generic over the physics backend to allow different
//! physics engines to be used.

use bevy::prelude::*;

use crate::animation::AnimatorParameters;
use crate::backend::{BackendHost, LocomotionBackend};
use crate::combo::JumpState;
use crate::config::LocomotionConfig;
use crate::input::{LocomotionInput, MovementInput};
use crate::state::{Airborne, Grounded, LocomotionState};
use crate::tick::Character;
use crate::tiers::JumpTierTable;

/// Accumulated fixed-step simulation time.
///
/// Combo decay deadlines are measured against this clock rather than wall
/// time, so pausing the fixed schedule pauses the decay too.
#[derive(Resource, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Resource)]
pub struct SimulationClock {
    elapsed: f64,
}

impl SimulationClock {
    /// Seconds of simulation time stepped so far.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance by `dt` seconds and return the new time.
    pub fn advance(&mut self, dt: f32) -> f64 {
        self.elapsed += f64::from(dt);
        self.elapsed
    }
}

/// Move queued [`LocomotionInput`] events into each character's inbox.
///
/// Only characters with a tier table are stepped, so only they receive
/// input; anything else would never drain its inbox.
pub fn route_input_events(
    mut events: EventReader<LocomotionInput>,
    mut q_inputs: Query<&mut MovementInput, With<JumpTierTable>>,
) {
    for input in events.read() {
        match q_inputs.get_mut(input.entity) {
            Ok(mut inbox) => inbox.push(input.event),
            Err(_) => {
                trace!(entity = ?input.entity, "dropping input for entity that is not stepped");
            }
        }
    }
}

/// Derive the jump tier table for newly configured characters.
///
/// Characters with an invalid config are left without a table; the stepping
/// system skips them.
pub fn init_jump_tiers(
    mut commands: Commands,
    q_configs: Query<(Entity, &LocomotionConfig), (Added<LocomotionConfig>, Without<JumpTierTable>)>,
) {
    for (entity, config) in &q_configs {
        match JumpTierTable::from_config(config) {
            Ok(tiers) => {
                debug!(?entity, "jump tiers initialized");
                commands.entity(entity).insert(tiers);
            }
            Err(err) => {
                warn!(?entity, %err, "locomotion config rejected; character will not move");
            }
        }
    }
}

/// Step every configured character by one fixed tick.
pub fn step_characters<B: LocomotionBackend>(world: &mut World) {
    let dt = B::get_fixed_timestep(world);
    let now = world
        .get_resource_or_init::<SimulationClock>()
        .advance(dt);

    // Collect entities to step
    let entities: Vec<(
        Entity,
        LocomotionConfig,
        JumpTierTable,
        MovementInput,
        LocomotionState,
        JumpState,
        Quat,
        AnimatorParameters,
    )> = world
        .query::<(
            Entity,
            &LocomotionConfig,
            &JumpTierTable,
            &MovementInput,
            &LocomotionState,
            &JumpState,
            &Transform,
            &AnimatorParameters,
        )>()
        .iter(world)
        .map(|(e, config, tiers, input, locomotion, jump, transform, animator)| {
            (
                e,
                *config,
                *tiers,
                input.clone(),
                *locomotion,
                *jump,
                transform.rotation,
                *animator,
            )
        })
        .collect();

    for (entity, config, tiers, mut input, mut locomotion, mut jump, mut heading, mut animator) in
        entities
    {
        let mut character = Character {
            config: &config,
            tiers: &tiers,
            input: &mut input,
            locomotion: &mut locomotion,
            jump: &mut jump,
            heading: &mut heading,
        };
        let mut host = BackendHost::<B>::new(world, entity);
        character.tick(&mut host, &mut animator, dt, now);

        if let Some(mut c) = world.get_mut::<MovementInput>(entity) {
            *c = input;
        }
        if let Some(mut c) = world.get_mut::<LocomotionState>(entity) {
            *c = locomotion;
        }
        if let Some(mut c) = world.get_mut::<JumpState>(entity) {
            *c = jump;
        }
        if let Some(mut c) = world.get_mut::<AnimatorParameters>(entity) {
            c.set_if_neq(animator);
        }
        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            if transform.rotation != heading {
                transform.rotation = heading;
            }
        }
    }
}

/// Sync state marker components from the last tick's ground contact.
pub fn sync_state_markers(
    mut commands: Commands,
    q_characters: Query<(Entity, &LocomotionState, Has<Grounded>, Has<Airborne>)>,
) {
    for (entity, state, has_grounded, has_airborne) in &q_characters {
        if state.is_grounded && !has_grounded {
            commands.entity(entity).insert(Grounded);
            commands.entity(entity).remove::<Airborne>();
        } else if !state.is_grounded && !has_airborne {
            commands.entity(entity).insert(Airborne);
            commands.entity(entity).remove::<Grounded>();
        }
    }
}
