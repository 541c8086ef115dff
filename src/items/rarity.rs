//! Item rarity tiers
//!
//! Rarity drives the stat multiplier on equippables and how many enchants
//! an item can roll.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rarity tiers, rolled once when an item spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
    Unique,
    Set,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
            Rarity::Unique => "Unique",
            Rarity::Set => "Set",
        }
    }

    /// Display color RGB.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Rarity::Common => (160, 160, 160),
            Rarity::Uncommon => (255, 255, 255),
            Rarity::Rare => (100, 150, 255),
            Rarity::Legendary => (255, 180, 50),
            Rarity::Unique => (139, 69, 19),
            Rarity::Set => (100, 255, 100),
        }
    }

    /// Multiplier applied to an equippable's base numbers.
    pub fn multiplier(&self) -> f32 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.1,
            Rarity::Rare => 1.2,
            Rarity::Legendary => 1.3,
            Rarity::Unique => 1.5,
            Rarity::Set => 1.5,
        }
    }

    /// Upper bound on the number of enchants this tier can roll.
    pub fn max_enchants(&self) -> u32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Legendary => 3,
            Rarity::Unique => 4,
            Rarity::Set => 4,
        }
    }
}

/// Weighted rarity table used when rolling item spawns. Floors tune their
/// own tables; this is data, not design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RarityWeights {
    weights: Vec<(Rarity, u32)>,
}

impl RarityWeights {
    pub fn new(weights: Vec<(Rarity, u32)>) -> Self {
        debug_assert!(weights.iter().any(|(_, w)| *w > 0));
        Self { weights }
    }

    /// Roll a rarity proportionally to the configured weights.
    pub fn roll(&self, rng: &mut impl Rng) -> Rarity {
        let total: u32 = self.weights.iter().map(|(_, w)| w).sum();
        let mut roll = rng.gen_range(0..total);
        for (rarity, weight) in &self.weights {
            if roll < *weight {
                return *rarity;
            }
            roll -= weight;
        }
        // total > 0, so the loop always returns
        unreachable!("rarity weights exhausted")
    }
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self::new(vec![
            (Rarity::Common, 55),
            (Rarity::Uncommon, 25),
            (Rarity::Rare, 13),
            (Rarity::Legendary, 4),
            (Rarity::Unique, 2),
            (Rarity::Set, 1),
        ])
    }
}
