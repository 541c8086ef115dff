//! Active abilities
//!
//! Abilities reach the player only as enchants on equipped items. This
//! module is the catalog: what each ability targets, what it costs, and
//! which attribute its damage scales with. Resolution happens in the
//! action layer, which owns the game state.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The closed set of castable abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Melee burst striking every adjacent tile. Scales with strength.
    Whirlwind,
    /// Straight beam toward a chosen tile, hitting everything along the
    /// path. Scales with intelligence.
    ArcaneBeam,
    /// Teleport next to a chosen target and strike it. Scales with
    /// dexterity.
    BlinkStrike,
}

/// Which attribute an ability's damage multiplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingStat {
    Strength,
    Intelligence,
    Dexterity,
}

/// How an ability collects its destination before it can resolve.
///
/// `SelfArea` resolves immediately around the caster. The other two are
/// targeting queries: the input collaborator must re-enter with a chosen
/// coordinate, or simply never re-enter to cancel. Cancellation costs
/// nothing because mana is only spent inside the cast itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSpec {
    /// Fixed-radius area centred on the caster; no follow-up input needed.
    SelfArea { radius: i32 },
    /// A straight line from the caster to a chosen tile.
    Line,
    /// A single chosen tile.
    Single,
}

impl AbilityKind {
    pub fn name(&self) -> &'static str {
        match self {
            AbilityKind::Whirlwind => "Whirlwind",
            AbilityKind::ArcaneBeam => "Arcane Beam",
            AbilityKind::BlinkStrike => "Blink Strike",
        }
    }

    /// Mana cost per cast.
    pub fn mana_cost(&self) -> i32 {
        match self {
            AbilityKind::Whirlwind => 8,
            AbilityKind::ArcaneBeam => 10,
            AbilityKind::BlinkStrike => 12,
        }
    }

    pub fn target_spec(&self) -> TargetSpec {
        match self {
            AbilityKind::Whirlwind => TargetSpec::SelfArea { radius: 1 },
            AbilityKind::ArcaneBeam => TargetSpec::Line,
            AbilityKind::BlinkStrike => TargetSpec::Single,
        }
    }

    pub fn scaling_stat(&self) -> ScalingStat {
        match self {
            AbilityKind::Whirlwind => ScalingStat::Strength,
            AbilityKind::ArcaneBeam => ScalingStat::Intelligence,
            AbilityKind::BlinkStrike => ScalingStat::Dexterity,
        }
    }

    pub fn all() -> &'static [AbilityKind] {
        &[
            AbilityKind::Whirlwind,
            AbilityKind::ArcaneBeam,
            AbilityKind::BlinkStrike,
        ]
    }

    /// Pick a random ability, used when rolling ABILITY enchants.
    pub fn random(rng: &mut impl Rng) -> AbilityKind {
        let all = Self::all();
        all[rng.gen_range(0..all.len())]
    }
}

/// An ability as it appears on an item: the kind plus its cast cost and a
/// level counter. Identical abilities sourced from several equipped items
/// stack their levels into a single entry (see `Equipment::abilities`),
/// and level multiplies straight into the damage formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityEnchant {
    pub kind: AbilityKind,
    pub mana_cost: i32,
    pub level: i32,
}

impl AbilityEnchant {
    pub fn new(kind: AbilityKind) -> Self {
        Self {
            kind,
            mana_cost: kind.mana_cost(),
            level: 1,
        }
    }

    pub fn description(&self) -> String {
        format!(
            "{} (level {}, {} mana)",
            self.kind.name(),
            self.level,
            self.mana_cost
        )
    }
}
