//! Equippable capability
//!
//! Everything an item needs to sit in an equipment slot: its slot type,
//! item level, rolled rarity, base numbers, and rolled enchants. Derived
//! combat numbers scale base values by item level and rarity.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enchant::Enchant;
use super::rarity::Rarity;

/// The six equipment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Hands,
    Pants,
    Shoes,
    Head,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Armor => "Armor",
            EquipSlot::Hands => "Hands",
            EquipSlot::Pants => "Pants",
            EquipSlot::Shoes => "Shoes",
            EquipSlot::Head => "Head",
        }
    }

    /// All slots in display order.
    pub fn all() -> &'static [EquipSlot] {
        &[
            EquipSlot::Weapon,
            EquipSlot::Armor,
            EquipSlot::Hands,
            EquipSlot::Pants,
            EquipSlot::Shoes,
            EquipSlot::Head,
        ]
    }
}

/// Equippable data attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equippable {
    pub slot: EquipSlot,
    pub item_level: i32,
    pub rarity: Rarity,
    /// Base defense; only armor-like pieces have a positive value.
    pub defense: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub enchants: Vec<Enchant>,
}

impl Equippable {
    /// A weapon template with the given base damage range.
    pub fn weapon(min_damage: i32, max_damage: i32) -> Self {
        Self {
            slot: EquipSlot::Weapon,
            item_level: 0,
            rarity: Rarity::Common,
            defense: 0,
            min_damage,
            max_damage,
            enchants: Vec::new(),
        }
    }

    /// An armor-type template for any non-weapon slot.
    pub fn armor_piece(slot: EquipSlot, defense: i32) -> Self {
        debug_assert!(slot != EquipSlot::Weapon);
        Self {
            slot,
            item_level: 0,
            rarity: Rarity::Common,
            defense,
            min_damage: 0,
            max_damage: 0,
            enchants: Vec::new(),
        }
    }

    /// Scaled minimum damage: `(base + ilvl) * rarity`, truncated.
    pub fn min_dmg(&self) -> i32 {
        ((self.min_damage + self.item_level) as f32 * self.rarity.multiplier()) as i32
    }

    /// Scaled maximum damage: `(base + ilvl) * rarity`, truncated.
    pub fn max_dmg(&self) -> i32 {
        ((self.max_damage + self.item_level) as f32 * self.rarity.multiplier()) as i32
    }

    /// Scaled defense while equipped. Pieces with no base defense
    /// contribute nothing regardless of item level.
    pub fn equipped_defense(&self) -> i32 {
        if self.defense > 0 {
            ((self.defense + self.item_level) as f32 * self.rarity.multiplier()) as i32
        } else {
            self.defense
        }
    }

    /// Roll this item's enchants: `random(0..=max)` draws for the rarity,
    /// each an independent uniform pick over every enchant kind.
    pub fn roll_enchants(&mut self, rng: &mut impl Rng) {
        let count = rng.gen_range(0..=self.rarity.max_enchants());
        let multiplier = self.rarity.multiplier();
        for _ in 0..count {
            self.enchants
                .push(Enchant::roll(self.item_level, multiplier, rng));
        }
    }

    /// Multi-line description for inspection screens.
    pub fn description(&self) -> String {
        let mut out = format!(
            "Item Level: {}\nRarity: {}\n",
            self.item_level,
            self.rarity.name()
        );
        if self.defense > 0 {
            out.push_str(&format!("Defense: {}\n", self.equipped_defense()));
        }
        if self.min_damage > 0 {
            out.push_str(&format!("Damage: {}-{}\n", self.min_dmg(), self.max_dmg()));
        }
        for enchant in &self.enchants {
            out.push_str(&enchant.description());
            out.push('\n');
        }
        out
    }
}
