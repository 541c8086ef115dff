//! Item definitions
//!
//! Items are created by cloning a template; equippables additionally get a
//! spawn-time roll (rarity, item level, enchants). An item is owned by
//! exactly one of the ground, an inventory, or an equip slot at any
//! instant, and moves between those owners without duplication.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::equippable::Equippable;
use super::rarity::RarityWeights;

/// Unique item ID for identity checks across owners.
pub type ItemId = u64;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Get the next unique item ID.
pub fn next_item_id() -> ItemId {
    NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed)
}

/// Ensure freshly generated IDs stay above everything in a loaded graph.
pub(crate) fn bump_item_id_counter(min_exclusive: ItemId) {
    NEXT_ITEM_ID.fetch_max(min_exclusive + 1, Ordering::Relaxed);
}

/// Single-use item effect. The effect itself resolves in the action layer,
/// which has the actor context; activation fails as Impossible when it
/// would do nothing (e.g. drinking at full health), leaving the item
/// unconsumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    /// Restore up to `amount` hit points.
    Healing { amount: i32 },
    /// Restore up to `amount` mana points.
    ManaRestore { amount: i32 },
    /// Grant empowered attack charges; each doubles one melee hit.
    Empower { charges: i32 },
}

/// An item instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub glyph: char,
    pub color: (u8, u8, u8),
    /// Only non-equippables stack; stacking is a display concern.
    pub stackable: bool,
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
}

impl Item {
    /// A consumable item template.
    pub fn consumable(name: &str, glyph: char, color: (u8, u8, u8), effect: Consumable) -> Self {
        Self {
            id: next_item_id(),
            name: name.to_string(),
            glyph,
            color,
            stackable: true,
            consumable: Some(effect),
            equippable: None,
        }
    }

    /// An equippable item template.
    pub fn equipment(name: &str, glyph: char, color: (u8, u8, u8), equippable: Equippable) -> Self {
        Self {
            id: next_item_id(),
            name: name.to_string(),
            glyph,
            color,
            stackable: false,
            consumable: None,
            equippable: Some(equippable),
        }
    }

    /// Spawn a copy of this template, rolled for the given floor depth.
    ///
    /// Equippables roll rarity from the weight table, an item level from
    /// the `[floor/2, floor*3/2]` window, and their enchants; the display
    /// name gets an `(ilvl N)` prefix and the rarity color.
    pub fn spawn(&self, floor: i32, weights: &RarityWeights, rng: &mut impl Rng) -> Item {
        let mut item = self.clone();
        item.id = next_item_id();

        if let Some(equippable) = item.equippable.as_mut() {
            equippable.rarity = weights.roll(rng);
            let min_ilvl = floor / 2;
            let max_ilvl = floor * 3 / 2;
            equippable.item_level = rng.gen_range(min_ilvl..=max_ilvl);
            equippable.roll_enchants(rng);

            item.color = equippable.rarity.color();
            item.name = format!("(ilvl {}) {}", equippable.item_level, item.name);
        }

        item
    }

    pub fn is_equipment(&self) -> bool {
        self.equippable.is_some()
    }

    /// Multi-line description for inspection screens.
    pub fn description(&self) -> String {
        let mut out = format!("{}\n\n", self.name);
        if let Some(equippable) = &self.equippable {
            out.push_str(&equippable.description());
        }
        out
    }
}
