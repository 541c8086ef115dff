//! Fighter state
//!
//! The mutable per-actor combat state: current pools, base values and the
//! empowered counter. Everything derived (capacities, attributes, defense)
//! is computed on the actor, which also sees the equipment; this struct
//! deliberately stores no aggregate.

use serde::{Deserialize, Serialize};

/// Base combat values plus current resource pools.
///
/// Pools are fractional internally (leech produces fractional gains) and
/// rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub(crate) hp: f32,
    pub(crate) mp: f32,
    pub base_hp: i32,
    pub base_mp: i32,
    pub base_strength: i32,
    pub base_intelligence: i32,
    pub base_dexterity: i32,
    pub base_constitution: i32,
    pub base_defense: i32,
    pub unarmed_min_damage: i32,
    pub unarmed_max_damage: i32,
    /// Remaining empowered attacks; each doubles one melee hit.
    pub empowered: i32,
}

impl Fighter {
    pub fn new(
        base_hp: i32,
        base_mp: i32,
        base_defense: i32,
        unarmed_min_damage: i32,
        unarmed_max_damage: i32,
    ) -> Self {
        Self {
            hp: base_hp as f32,
            mp: base_mp as f32,
            base_hp,
            base_mp,
            base_strength: 0,
            base_intelligence: 0,
            base_dexterity: 0,
            base_constitution: 0,
            base_defense,
            unarmed_min_damage,
            unarmed_max_damage,
            empowered: 0,
        }
    }

    /// Set base attributes on a template. Pools are refreshed by the actor
    /// once it can see its (empty) equipment.
    pub fn with_attributes(mut self, strength: i32, intelligence: i32, dexterity: i32, constitution: i32) -> Self {
        self.base_strength = strength;
        self.base_intelligence = intelligence;
        self.base_dexterity = dexterity;
        self.base_constitution = constitution;
        self
    }

    /// Current hit points, exact.
    pub fn hp_raw(&self) -> f32 {
        self.hp
    }

    /// Current mana, exact.
    pub fn mp_raw(&self) -> f32 {
        self.mp
    }
}
