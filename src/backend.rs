//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement to
//! drive a combo-locomotion character. The controller only needs a ground
//! contact query and a collision-respecting "move by" primitive; everything
//! else about collision resolution stays inside the backend.

use bevy::prelude::*;

use crate::tick::CharacterHost;

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the controller.
///
/// # Example
///
/// For an example implementation, see the `rapier` module's `Rapier3dBackend`
/// which implements this trait on Rapier's kinematic character controller.
pub trait LocomotionBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Whether the entity is touching the ground.
    fn is_grounded(world: &World, entity: Entity) -> bool;

    /// Request a displacement of `velocity * dt` for the entity.
    ///
    /// Fire-and-forget: the backend resolves collisions when it next steps.
    fn move_by(world: &mut World, entity: Entity, velocity: Vec3, dt: f32);

    /// Get the fixed timestep delta time.
    fn get_fixed_timestep(world: &World) -> f32 {
        world
            .get_resource::<Time<Fixed>>()
            .map(|t| t.delta_secs())
            .filter(|&d| d > 0.0)
            .unwrap_or(1.0 / 60.0)
    }
}

/// Empty plugin for backends that don't need additional setup.
pub struct NoOpBackendPlugin;

impl Plugin for NoOpBackendPlugin {
    fn build(&self, _app: &mut App) {}
}

/// [`CharacterHost`] for one entity, backed by a [`LocomotionBackend`].
pub struct BackendHost<'w, B: LocomotionBackend> {
    world: &'w mut World,
    entity: Entity,
    _marker: std::marker::PhantomData<B>,
}

impl<'w, B: LocomotionBackend> BackendHost<'w, B> {
    /// Wrap `world` for stepping `entity`.
    pub fn new(world: &'w mut World, entity: Entity) -> Self {
        Self {
            world,
            entity,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<B: LocomotionBackend> CharacterHost for BackendHost<'_, B> {
    fn is_grounded(&self) -> bool {
        B::is_grounded(self.world, self.entity)
    }

    fn move_by(&mut self, velocity: Vec3, dt: f32) {
        B::move_by(self.world, self.entity, velocity, dt);
    }
}
