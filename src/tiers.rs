//! Per-tier jump curves.
//!
//! Each jump of a combo climbs a little higher and hangs a little longer than
//! the previous one. The curves are derived once from the config and are
//! read-only afterwards.

use bevy::prelude::*;

use crate::config::{ConfigError, LocomotionConfig};

/// Highest jump tier of a combo.
pub const MAX_JUMP_TIER: u8 = 3;

/// Extra apex height per tier, added to `max_jump_height`.
const TIER_HEIGHT_BONUS: [f32; 4] = [0.0, 0.0, 1.0, 2.0];

/// Time-to-apex stretch per tier.
const TIER_TIME_FACTOR: [f32; 4] = [1.0, 1.0, 1.1, 1.2];

/// Gravity and launch velocity for every jump tier.
///
/// Tier 0 is the "no active jump" tier and only has a gravity, which is the
/// same as tier 1. Launch velocities exist for tiers 1 to 3.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct JumpTierTable {
    gravities: [f32; 4],
    velocities: [f32; 4],
}

impl JumpTierTable {
    /// Derive the table from a validated config.
    pub fn from_config(config: &LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_limits(config.max_jump_height, config.max_jump_time))
    }

    /// Derive the table from the first jump's apex height and total airtime.
    ///
    /// For tier `t`, with `apex = max_jump_time / 2 * factor(t)` and
    /// `height = max_jump_height + bonus(t)`:
    /// - gravity is `-2 * height / apex^2`
    /// - launch velocity is `2 * height / apex`
    ///
    /// Callers are expected to pass positive limits; see
    /// [`LocomotionConfig::validate`].
    pub fn from_limits(max_jump_height: f32, max_jump_time: f32) -> Self {
        let base_apex = max_jump_time / 2.0;
        let mut gravities = [0.0; 4];
        let mut velocities = [0.0; 4];

        for tier in 1..=MAX_JUMP_TIER as usize {
            let height = max_jump_height + TIER_HEIGHT_BONUS[tier];
            let apex = base_apex * TIER_TIME_FACTOR[tier];
            gravities[tier] = -2.0 * height / (apex * apex);
            velocities[tier] = 2.0 * height / apex;
        }
        gravities[0] = gravities[1];

        Self {
            gravities,
            velocities,
        }
    }

    /// Gravity for a tier in `0..=3`.
    ///
    /// # Panics
    /// Panics if `tier > 3`; jump counts never exceed the top tier.
    #[inline]
    pub fn gravity(&self, tier: u8) -> f32 {
        assert!(
            tier <= MAX_JUMP_TIER,
            "jump tier {tier} is out of range 0..={MAX_JUMP_TIER}"
        );
        self.gravities[tier as usize]
    }

    /// Launch velocity for a tier in `1..=3`.
    ///
    /// # Panics
    /// Panics for tier 0 or above 3. A jump always has a tier of at least 1,
    /// so asking for tier 0 means the jump state is corrupt.
    #[inline]
    pub fn initial_velocity(&self, tier: u8) -> f32 {
        assert!(
            (1..=MAX_JUMP_TIER).contains(&tier),
            "no launch velocity for jump tier {tier}; active jumps use tiers 1..={MAX_JUMP_TIER}"
        );
        self.velocities[tier as usize]
    }
}

impl Default for JumpTierTable {
    fn default() -> Self {
        let config = LocomotionConfig::default();
        Self::from_limits(config.max_jump_height, config.max_jump_time)
    }
}
