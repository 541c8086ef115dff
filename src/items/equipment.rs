//! Equipment slot manager
//!
//! Six named slots, each owning at most one item. All enchant and ability
//! aggregation across equipped items happens here; the stat engine only
//! folds over what this module reports, so there is no cache to go stale.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::combat::abilities::AbilityEnchant;
use super::enchant::{Enchant, EnchantKind};
use super::equippable::EquipSlot;
use super::item::{Item, ItemId};

/// The worn item set of one actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    slots: HashMap<EquipSlot, Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn get_mut(&mut self, slot: EquipSlot) -> Option<&mut Item> {
        self.slots.get_mut(&slot)
    }

    /// All currently equipped items.
    pub fn equipped_items(&self) -> impl Iterator<Item = &Item> {
        self.slots.values()
    }

    /// Number of occupied slots.
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Put an item into its slot, returning the evicted occupant if any.
    ///
    /// Contract: the item must carry an equippable capability; the action
    /// layer rejects everything else before it gets here.
    pub fn equip(&mut self, item: Item) -> Option<Item> {
        let slot = item
            .equippable
            .as_ref()
            .expect("only equippable items reach Equipment::equip")
            .slot;
        self.slots.insert(slot, item)
    }

    /// Empty a slot, returning the item that was in it.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slots.remove(&slot)
    }

    /// Remove a specific item by identity, wherever it is equipped.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let slot = self.slot_of(id)?;
        self.slots.remove(&slot)
    }

    /// The slot a given item currently occupies.
    pub fn slot_of(&self, id: ItemId) -> Option<EquipSlot> {
        self.slots
            .iter()
            .find(|(_, item)| item.id == id)
            .map(|(slot, _)| *slot)
    }

    pub fn item_is_equipped(&self, id: ItemId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Every enchant on every equipped item.
    pub fn enchants(&self) -> impl Iterator<Item = &Enchant> {
        self.slots
            .values()
            .filter_map(|item| item.equippable.as_ref())
            .flat_map(|equippable| equippable.enchants.iter())
    }

    /// Sum of passive bonuses of one enchant kind across all equipment.
    pub fn stat_bonus(&self, kind: EnchantKind) -> i32 {
        self.enchants()
            .filter(|enchant| enchant.kind() == kind)
            .map(|enchant| enchant.bonus())
            .sum()
    }

    /// Defense contributed by the worn pieces themselves (enchant bonuses
    /// are aggregated separately via `stat_bonus`).
    pub fn equipped_defense(&self) -> i32 {
        self.slots
            .values()
            .filter_map(|item| item.equippable.as_ref())
            .map(|equippable| equippable.equipped_defense())
            .sum()
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.get(EquipSlot::Weapon)
    }

    /// Weapon minimum damage including DAMAGE enchants from every equipped
    /// item. `None` when unarmed.
    pub fn min_damage(&self) -> Option<i32> {
        let weapon = self.weapon()?.equippable.as_ref()?;
        Some(weapon.min_dmg() + self.stat_bonus(EnchantKind::Damage))
    }

    /// Weapon maximum damage including DAMAGE enchants. `None` when unarmed.
    pub fn max_damage(&self) -> Option<i32> {
        let weapon = self.weapon()?.equippable.as_ref()?;
        Some(weapon.max_dmg() + self.stat_bonus(EnchantKind::Damage))
    }

    /// The castable ability list, stacked for display and potency:
    /// ability enchants are sorted by name and identical kinds merge into
    /// one entry whose level is the combined run, so the same ability on
    /// two items casts at level 2 instead of showing up twice.
    pub fn abilities(&self) -> Vec<AbilityEnchant> {
        let mut abilities: Vec<AbilityEnchant> = self
            .enchants()
            .filter_map(|enchant| match enchant {
                Enchant::Ability(ability) => Some(ability.clone()),
                _ => None,
            })
            .collect();
        abilities.sort_by(|a, b| a.kind.name().cmp(b.kind.name()));

        let mut stacked: Vec<AbilityEnchant> = Vec::new();
        for ability in abilities {
            match stacked.last_mut() {
                Some(previous) if previous.kind == ability.kind => {
                    previous.level += ability.level;
                }
                _ => stacked.push(ability),
            }
        }
        stacked
    }

    /// Look up one castable ability by kind.
    pub fn ability(&self, kind: crate::combat::abilities::AbilityKind) -> Option<AbilityEnchant> {
        self.abilities().into_iter().find(|a| a.kind == kind)
    }
}
