//! Rapier3D physics backend implementation.
//!
//! This module provides the physics backend for Bevy Rapier3D. Enable with the
//! `rapier3d` feature.
//!
//! The controller polls ground contact right after it moves, so moves are
//! resolved immediately with Rapier's shape mover instead of being queued for
//! the next physics step. The resulting translation is written to the
//! `Transform`, and Rapier picks it up as the kinematic target.

use bevy::ecs::system::SystemState;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::backend::LocomotionBackend;

/// Rapier3D physics backend for the locomotion controller.
///
/// Characters need a [`Rapier3dMover`] and a [`Collider`]. The ground query
/// reads the contact produced by the character's latest move.
pub struct Rapier3dBackend;

impl LocomotionBackend for Rapier3dBackend {
    fn plugin() -> impl Plugin {
        Rapier3dBackendPlugin
    }

    fn is_grounded(world: &World, entity: Entity) -> bool {
        world
            .get::<Rapier3dMover>(entity)
            .map(|mover| mover.grounded)
            .unwrap_or(false)
    }

    fn move_by(world: &mut World, entity: Entity, velocity: Vec3, dt: f32) {
        let Some(output) = resolve_move(world, entity, velocity * dt) else {
            return;
        };

        if let Some(mut transform) = world.get_mut::<Transform>(entity) {
            transform.translation += output.effective_translation;
        }
        if let Some(mut mover) = world.get_mut::<Rapier3dMover>(entity) {
            mover.grounded = output.grounded;
        }
    }
}

/// Plugin that sets up Rapier3D-specific state for the controller.
///
/// The host adds `RapierPhysicsPlugin` itself, with its own scale and schedule.
pub struct Rapier3dBackendPlugin;

impl Plugin for Rapier3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RapierMoveQuery>();
    }
}

/// Cached query state for reaching the default Rapier context from `World`.
#[derive(Resource)]
struct RapierMoveQuery(SystemState<ReadRapierContext<'static, 'static>>);

impl FromWorld for RapierMoveQuery {
    fn from_world(world: &mut World) -> Self {
        Self(SystemState::new(world))
    }
}

/// Run Rapier's shape mover for one requested displacement.
///
/// Returns `None` when the character lacks its physics components or no
/// Rapier context exists yet.
fn resolve_move(world: &mut World, entity: Entity, desired: Vec3) -> Option<MoveShapeOutput> {
    if !world.contains_resource::<RapierMoveQuery>() {
        world.init_resource::<RapierMoveQuery>();
    }

    world.resource_scope(|world, mut query: Mut<RapierMoveQuery>| {
        let rapier_context = query.0.get(world);
        let Ok(context) = rapier_context.single() else {
            warn_once!("no Rapier context; character moves are skipped");
            return None;
        };

        let collider = world.get::<Collider>(entity)?;
        let transform = world.get::<Transform>(entity)?;
        let mover = world.get::<Rapier3dMover>(entity)?;

        let filter = QueryFilter::default()
            .exclude_rigid_body(entity)
            .exclude_collider(entity)
            .exclude_sensors();

        Some(context.move_shape(
            desired,
            collider,
            transform.translation,
            transform.rotation,
            1.0,
            &mover.options(desired),
            filter,
            |_| {},
        ))
    })
}

/// Shape-mover settings and the last ground contact of a Rapier character.
#[derive(Component, Debug, Clone, Copy)]
pub struct Rapier3dMover {
    /// Gap kept between the character and obstacles.
    pub offset: CharacterLength,
    /// Distance within which a descending character sticks to the ground.
    pub snap_to_ground: Option<CharacterLength>,
    /// Steepest slope the character can walk up, in radians.
    pub max_slope_climb_angle: f32,
    /// Slopes steeper than this make the character slide, in radians.
    pub min_slope_slide_angle: f32,
    grounded: bool,
}

impl Rapier3dMover {
    /// Whether the latest move ended on the ground.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Shape-mover options for a move by `desired`.
    ///
    /// Snapping is suspended for upward moves so a launch is not pulled back
    /// onto the ground it just left.
    fn options(&self, desired: Vec3) -> MoveShapeOptions {
        let snap_to_ground = if desired.y > 0.0 {
            None
        } else {
            self.snap_to_ground
        };
        MoveShapeOptions {
            up: Vec3::Y,
            offset: self.offset,
            max_slope_climb_angle: self.max_slope_climb_angle,
            min_slope_slide_angle: self.min_slope_slide_angle,
            snap_to_ground,
            ..default()
        }
    }
}

impl Default for Rapier3dMover {
    fn default() -> Self {
        Self {
            offset: CharacterLength::Absolute(0.01),
            snap_to_ground: Some(CharacterLength::Absolute(0.2)),
            max_slope_climb_angle: 45.0_f32.to_radians(),
            min_slope_slide_angle: 30.0_f32.to_radians(),
            grounded: false,
        }
    }
}

/// Helper bundle for Rapier3D character physics.
///
/// Bundles the kinematic body, mover settings and capsule collider a
/// combo-locomotion character needs.
#[derive(Bundle)]
pub struct Rapier3dCharacterBundle {
    pub rigid_body: RigidBody,
    pub mover: Rapier3dMover,
    pub collider: Collider,
}

impl Rapier3dCharacterBundle {
    /// Capsule character standing on its feet.
    ///
    /// `half_height` is the half-length of the capsule's straight segment.
    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self {
            rigid_body: RigidBody::KinematicPositionBased,
            mover: Rapier3dMover::default(),
            collider: Collider::capsule_y(half_height, radius),
        }
    }

    /// Builder: replace the mover settings.
    pub fn with_mover(mut self, mover: Rapier3dMover) -> Self {
        self.mover = mover;
        self
    }
}

impl Default for Rapier3dCharacterBundle {
    fn default() -> Self {
        Self::capsule(0.5, 0.3)
    }
}
