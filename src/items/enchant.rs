//! Rolled item enchants
//!
//! An enchant is immutable once rolled: either a passive stat bonus that
//! the stat engine folds over, or an active ability grant.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::abilities::{AbilityEnchant, AbilityKind};

/// Discriminant used when aggregating bonuses by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnchantKind {
    Hp,
    Mp,
    Damage,
    Defense,
    Leech,
    Strength,
    Intelligence,
    Dexterity,
    Constitution,
    Ability,
}

/// A single rolled enchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Enchant {
    Hp { bonus: i32 },
    Mp { bonus: i32 },
    Damage { bonus: i32 },
    Defense { bonus: i32 },
    /// Life leech, in percent of damage dealt.
    Leech { bonus: i32 },
    Strength { bonus: i32 },
    Intelligence { bonus: i32 },
    Dexterity { bonus: i32 },
    Constitution { bonus: i32 },
    Ability(AbilityEnchant),
}

impl Enchant {
    pub fn kind(&self) -> EnchantKind {
        match self {
            Enchant::Hp { .. } => EnchantKind::Hp,
            Enchant::Mp { .. } => EnchantKind::Mp,
            Enchant::Damage { .. } => EnchantKind::Damage,
            Enchant::Defense { .. } => EnchantKind::Defense,
            Enchant::Leech { .. } => EnchantKind::Leech,
            Enchant::Strength { .. } => EnchantKind::Strength,
            Enchant::Intelligence { .. } => EnchantKind::Intelligence,
            Enchant::Dexterity { .. } => EnchantKind::Dexterity,
            Enchant::Constitution { .. } => EnchantKind::Constitution,
            Enchant::Ability(_) => EnchantKind::Ability,
        }
    }

    /// The stat bonus this enchant contributes. Ability enchants carry no
    /// passive bonus.
    pub fn bonus(&self) -> i32 {
        match self {
            Enchant::Hp { bonus }
            | Enchant::Mp { bonus }
            | Enchant::Damage { bonus }
            | Enchant::Defense { bonus }
            | Enchant::Leech { bonus }
            | Enchant::Strength { bonus }
            | Enchant::Intelligence { bonus }
            | Enchant::Dexterity { bonus }
            | Enchant::Constitution { bonus } => *bonus,
            Enchant::Ability(_) => 0,
        }
    }

    /// Roll one enchant: a uniformly chosen kind, with stat magnitude
    /// `max(1, ceil(item_level * rarity_multiplier))`.
    pub fn roll(item_level: i32, multiplier: f32, rng: &mut impl Rng) -> Enchant {
        let bonus = ((item_level as f32 * multiplier).ceil() as i32).max(1);
        match rng.gen_range(0..10) {
            0 => Enchant::Hp { bonus },
            1 => Enchant::Mp { bonus },
            2 => Enchant::Damage { bonus },
            3 => Enchant::Defense { bonus },
            4 => Enchant::Leech { bonus },
            5 => Enchant::Strength { bonus },
            6 => Enchant::Intelligence { bonus },
            7 => Enchant::Dexterity { bonus },
            8 => Enchant::Constitution { bonus },
            _ => Enchant::Ability(AbilityEnchant::new(AbilityKind::random(rng))),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Enchant::Hp { bonus } => format!("Increases HP by {}.", bonus),
            Enchant::Mp { bonus } => format!("Increases MP by {}.", bonus),
            Enchant::Damage { bonus } => format!("Increases Damage by {}.", bonus),
            Enchant::Defense { bonus } => format!("Increases Defense by {}.", bonus),
            Enchant::Leech { bonus } => format!("{}% life leech.", bonus),
            Enchant::Strength { bonus } => format!("Increases Strength by {}.", bonus),
            Enchant::Intelligence { bonus } => format!("Increases Intelligence by {}.", bonus),
            Enchant::Dexterity { bonus } => format!("Increases Dexterity by {}.", bonus),
            Enchant::Constitution { bonus } => format!("Increases Constitution by {}.", bonus),
            Enchant::Ability(ability) => format!("Grants {}.", ability.description()),
        }
    }
}
