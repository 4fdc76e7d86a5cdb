//! Jump combo state machine.
//!
//! A character can chain up to three jumps. Each jump started within the decay
//! window after the previous landing climbs one tier; landing from the third
//! jump always ends the combo. The decay timer is a deadline on the
//! simulation clock, so cancelling it is just clearing the field.

use bevy::prelude::*;

use crate::tiers::MAX_JUMP_TIER;

/// Result of evaluating jump input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpTransition {
    /// Nothing changed.
    None,
    /// A jump of the given tier started this tick.
    Started {
        /// Tier of the new jump, in `1..=3`.
        tier: u8,
    },
    /// Jump was released on the ground; the next press may start a new jump.
    Released,
}

/// What happened when the character touched down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    /// Tier of the jump that just ended.
    pub tier: u8,
    /// Whether the landing ended the combo (third jump).
    pub combo_finished: bool,
}

/// Jump combo state for a character.
///
/// - `jump_count` is the tier of the current or most recent jump, `0..=3`.
/// - `is_jumping` latches from launch until jump is released on the ground,
///   so holding jump never re-triggers.
/// - `is_jump_animating` is true from launch until the landing tick.
/// - `decay_deadline`, when set, is the simulation time at which the combo
///   count falls back to zero.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct JumpState {
    jump_count: u8,
    is_jumping: bool,
    is_jump_animating: bool,
    decay_deadline: Option<f64>,
}

impl JumpState {
    /// Create a grounded state with no combo in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current combo tier, `0..=3`.
    #[inline]
    pub fn jump_count(&self) -> u8 {
        self.jump_count
    }

    /// Whether a jump is latched (launched and not yet released on the ground).
    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    /// Whether the jump animation is playing (launched and not yet landed).
    #[inline]
    pub fn is_jump_animating(&self) -> bool {
        self.is_jump_animating
    }

    /// Whether a combo decay is pending.
    #[inline]
    pub fn decay_timer_active(&self) -> bool {
        self.decay_deadline.is_some()
    }

    /// Simulation time at which the combo decays, if pending.
    #[inline]
    pub fn decay_deadline(&self) -> Option<f64> {
        self.decay_deadline
    }

    /// Reset the combo if its decay deadline has been reached.
    ///
    /// Returns `true` when the count was reset.
    pub fn expire_decay(&mut self, now: f64) -> bool {
        match self.decay_deadline {
            Some(deadline) if now >= deadline => {
                self.decay_deadline = None;
                if self.jump_count != 0 {
                    debug!(tier = self.jump_count, "jump combo decayed");
                }
                self.jump_count = 0;
                true
            }
            _ => false,
        }
    }

    /// Handle ground contact for this tick.
    ///
    /// Only the first grounded tick after a launch counts as a landing: it
    /// stops the jump animation and arms the decay deadline. Landing from the
    /// top tier resets the count immediately.
    pub fn touch_ground(&mut self, now: f64, decay_window: f32) -> Option<Landing> {
        if !self.is_jump_animating {
            return None;
        }

        let tier = self.jump_count;
        self.is_jump_animating = false;
        self.decay_deadline = Some(now + f64::from(decay_window));

        let combo_finished = tier == MAX_JUMP_TIER;
        if combo_finished {
            self.jump_count = 0;
        }
        debug!(tier, combo_finished, "landed");

        Some(Landing {
            tier,
            combo_finished,
        })
    }

    /// Evaluate jump input for this tick.
    ///
    /// A jump starts when grounded, jump is held, no jump is latched and the
    /// combo has room for another tier. Starting a jump cancels a pending
    /// decay. Releasing jump on the ground unlatches.
    pub fn evaluate(&mut self, grounded: bool, jump_held: bool) -> JumpTransition {
        if !self.is_jumping && grounded && jump_held && self.jump_count < MAX_JUMP_TIER {
            self.decay_deadline = None;
            self.is_jumping = true;
            self.is_jump_animating = true;
            self.jump_count += 1;
            JumpTransition::Started {
                tier: self.jump_count,
            }
        } else if !jump_held && grounded && self.is_jumping {
            self.is_jumping = false;
            JumpTransition::Released
        } else {
            JumpTransition::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const WINDOW: f32 = 0.5;

    /// One tick of the combo machine in controller order: decay, landing, input.
    fn step(state: &mut JumpState, now: f64, grounded: bool, jump_held: bool) -> JumpTransition {
        state.expire_decay(now);
        if grounded {
            state.touch_ground(now, WINDOW);
        }
        state.evaluate(grounded, jump_held)
    }

    fn assert_invariants(state: &JumpState) {
        assert!(state.jump_count() <= MAX_JUMP_TIER, "{state:?}");
        if state.is_jump_animating() {
            assert!((1..=MAX_JUMP_TIER).contains(&state.jump_count()), "{state:?}");
            assert!(state.is_jumping(), "{state:?}");
            assert!(!state.decay_timer_active(), "{state:?}");
        }
    }

    #[test]
    fn new_state_is_idle() {
        let state = JumpState::new();
        assert_eq!(state.jump_count(), 0);
        assert!(!state.is_jumping());
        assert!(!state.is_jump_animating());
        assert!(!state.decay_timer_active());
    }

    #[test]
    fn jump_starts_only_when_grounded() {
        let mut state = JumpState::new();
        assert_eq!(state.evaluate(false, true), JumpTransition::None);
        assert_eq!(state.evaluate(true, true), JumpTransition::Started { tier: 1 });
        assert!(state.is_jumping());
        assert!(state.is_jump_animating());
    }

    #[test]
    fn holding_jump_does_not_retrigger() {
        let mut state = JumpState::new();
        step(&mut state, 0.0, true, true);
        step(&mut state, 0.1, false, true);
        // Land while still holding jump
        assert_eq!(step(&mut state, 0.2, true, true), JumpTransition::None);
        assert_eq!(step(&mut state, 0.3, true, true), JumpTransition::None);
        assert_eq!(state.jump_count(), 1);
        assert!(state.is_jumping());
        assert!(!state.is_jump_animating());
    }

    #[test]
    fn release_on_ground_unlatches() {
        let mut state = JumpState::new();
        step(&mut state, 0.0, true, true);
        // Releasing in the air keeps the latch
        assert_eq!(step(&mut state, 0.1, false, false), JumpTransition::None);
        assert!(state.is_jumping());
        assert_eq!(step(&mut state, 0.2, true, false), JumpTransition::Released);
        assert!(!state.is_jumping());
    }

    #[test]
    fn landing_arms_decay_timer() {
        let mut state = JumpState::new();
        state.evaluate(true, true);
        let landing = state.touch_ground(1.0, WINDOW);

        assert_eq!(
            landing,
            Some(Landing {
                tier: 1,
                combo_finished: false
            })
        );
        assert!(!state.is_jump_animating());
        assert_eq!(state.decay_deadline(), Some(1.5));
    }

    #[test]
    fn grounded_without_jump_is_not_a_landing() {
        let mut state = JumpState::new();
        assert_eq!(state.touch_ground(0.0, WINDOW), None);
        assert!(!state.decay_timer_active());
    }

    #[test]
    fn combo_chains_three_tiers_then_resets() {
        let mut state = JumpState::new();
        let mut trace = Vec::new();
        let mut now = 0.0;

        for _ in 0..3 {
            // Launch
            step(&mut state, now, true, true);
            trace.push(state.jump_count());
            now += 0.1;
            // Airborne, jump released mid-air
            step(&mut state, now, false, false);
            now += 0.1;
            // Land before the decay window runs out
            step(&mut state, now, true, false);
            trace.push(state.jump_count());
            now += 0.1;
        }

        assert_eq!(trace, vec![1, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn combo_decays_after_window() {
        let mut state = JumpState::new();
        step(&mut state, 0.0, true, true);
        step(&mut state, 0.1, false, false);
        step(&mut state, 0.2, true, false);
        assert_eq!(state.jump_count(), 1);

        // Still inside the window
        step(&mut state, 0.6, true, false);
        assert_eq!(state.jump_count(), 1);

        // Past the window with no jump
        step(&mut state, 0.75, true, false);
        assert_eq!(state.jump_count(), 0);
        assert!(!state.decay_timer_active());

        // Next jump starts a fresh combo
        assert_eq!(step(&mut state, 0.8, true, true), JumpTransition::Started { tier: 1 });
    }

    #[test]
    fn new_jump_cancels_pending_decay() {
        let mut state = JumpState::new();
        step(&mut state, 0.0, true, true);
        step(&mut state, 0.1, false, false);
        step(&mut state, 0.2, true, false);
        assert_eq!(state.decay_deadline(), Some(0.2 + f64::from(WINDOW)));

        assert_eq!(step(&mut state, 0.4, true, true), JumpTransition::Started { tier: 2 });
        assert!(!state.decay_timer_active());

        // Well past the old deadline, still mid-combo
        step(&mut state, 2.0, false, true);
        assert_eq!(state.jump_count(), 2);
    }

    #[test]
    fn third_landing_resets_regardless_of_timer() {
        let mut state = JumpState::new();
        for tier in 1..=3 {
            assert_eq!(state.evaluate(true, true), JumpTransition::Started { tier });
            let landing = state.touch_ground(f64::from(tier), WINDOW).unwrap();
            assert_eq!(landing.combo_finished, tier == 3);
            state.evaluate(true, false);
        }
        assert_eq!(state.jump_count(), 0);
        assert!(state.decay_timer_active());
    }

    #[test]
    fn unlatched_fall_launches_on_landing_tick() {
        let mut state = JumpState::new();
        // Walked off a ledge, jump pressed on the way down
        step(&mut state, 0.0, false, false);
        step(&mut state, 0.1, false, true);
        assert_eq!(step(&mut state, 0.2, true, true), JumpTransition::Started { tier: 1 });
    }

    #[test]
    fn invariants_hold_for_random_input() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut state = JumpState::new();
        let mut now = 0.0;

        for _ in 0..20_000 {
            now += rng.gen_range(0.001..0.08);
            let grounded = rng.gen_bool(0.5);
            let jump_held = rng.gen_bool(0.5);
            step(&mut state, now, grounded, jump_held);
            assert_invariants(&state);
        }
    }
}
