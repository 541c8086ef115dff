//! Experience ledger
//!
//! Tracks accumulated xp against a per-level threshold. Leveling is a
//! two-step protocol: `add_xp` only accumulates and announces eligibility;
//! the level itself changes when the player resolves it with exactly one
//! stat allocation. Excess xp carries forward, one threshold at a time.

use serde::{Deserialize, Serialize};

use crate::log::{MessageCategory, MessageSink};

/// The stat grant chosen when a level-up is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelUpChoice {
    MaxHp,
    Strength,
    Intelligence,
    Dexterity,
    Constitution,
}

/// One actor's progression track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub current_level: i32,
    pub current_xp: i32,
    pub level_up_base: i32,
    /// Per-level threshold growth; zero marks a non-leveling actor.
    pub level_up_factor: i32,
    /// Experience granted to the killer when this actor dies.
    pub xp_given: i32,
}

impl Level {
    pub fn new(level_up_base: i32, level_up_factor: i32, xp_given: i32) -> Self {
        Self {
            current_level: 1,
            current_xp: 0,
            level_up_base,
            level_up_factor,
            xp_given,
        }
    }

    /// A leveling track (the player).
    pub fn leveling() -> Self {
        Self::new(0, 150, 0)
    }

    /// A non-leveling track that only grants xp on death (monsters).
    pub fn xp_reward(xp_given: i32) -> Self {
        Self::new(0, 0, xp_given)
    }

    /// Experience needed before the next level can be resolved.
    pub fn experience_to_next_level(&self) -> i32 {
        self.level_up_base + self.current_level * self.level_up_factor
    }

    /// Eligible for a level-up, awaiting its stat allocation.
    pub fn requires_level_up(&self) -> bool {
        self.level_up_factor > 0 && self.current_xp > self.experience_to_next_level()
    }

    /// Accumulate experience. No-op for zero xp or a non-leveling track.
    /// Announces (but does not apply) a pending level-up.
    pub fn add_xp(&mut self, xp: i32, log: &mut dyn MessageSink) {
        if xp == 0 || self.level_up_factor == 0 {
            return;
        }

        self.current_xp += xp;
        log.push(
            format!("You gain {} experience points.", xp),
            MessageCategory::Progress,
        );

        if self.requires_level_up() {
            log.push(
                format!("You advance to level {}!", self.current_level + 1),
                MessageCategory::Progress,
            );
        }
    }

    /// Consume one threshold and bump the level. Called by the actor once
    /// a stat allocation is chosen; xp beyond the single threshold stays.
    pub(crate) fn level_up(&mut self) {
        self.current_xp -= self.experience_to_next_level();
        self.current_level += 1;
    }
}
