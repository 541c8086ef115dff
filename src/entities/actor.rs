//! Actors
//!
//! An actor owns its fighter state, equipment, inventory and progression
//! ledger. Every derived statistic is an accessor that re-aggregates from
//! current equipment on each call; there is no cached value to invalidate,
//! so a changed enchant list is visible on the very next read.

use serde::{Deserialize, Serialize};

use crate::combat::Fighter;
use crate::error::{impossible, ActionResult};
use crate::items::{Equipment, Inventory, ItemId};
use crate::items::enchant::EnchantKind;
use crate::log::{MessageCategory, MessageSink};
use crate::progression::{Level, LevelUpChoice};
use crate::world::Position;

/// Marker for who drives an actor's turns. A dead actor has no behavior;
/// that absence is what makes death irreversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiBehavior {
    /// Turns come from player input.
    Player,
    /// Turns come from the external monster AI.
    Hostile,
}

/// Draw layering; corpses render under items, items under the living.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

/// A creature on the floor: the player or a monster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Position,
    pub name: String,
    pub glyph: char,
    pub color: (u8, u8, u8),
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub ai: Option<AiBehavior>,
    /// Slaying the final boss wins the run.
    pub boss: bool,
    pub fighter: Fighter,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub level: Level,
}

impl Actor {
    pub fn new(
        name: &str,
        glyph: char,
        color: (u8, u8, u8),
        ai: AiBehavior,
        fighter: Fighter,
        inventory_capacity: usize,
        level: Level,
    ) -> Self {
        let mut actor = Self {
            pos: Position::new(0, 0),
            name: name.to_string(),
            glyph,
            color,
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            ai: Some(ai),
            boss: false,
            fighter,
            equipment: Equipment::new(),
            inventory: Inventory::new(inventory_capacity),
            level,
        };
        actor.restore_all();
        actor
    }

    pub fn with_boss_flag(mut self) -> Self {
        self.boss = true;
        self
    }

    /// Spawn a copy of this template at a location, with a fresh runtime
    /// state block: full pools, no empowered charges. Value data (bases,
    /// starting gear) is copied; nothing mutable is shared with the
    /// template.
    pub fn spawn_at(&self, pos: Position) -> Actor {
        let mut actor = self.clone();
        actor.pos = pos;
        actor.fighter.empowered = 0;
        actor.restore_all();
        actor
    }

    /// Alive as long as something can still drive it.
    pub fn is_alive(&self) -> bool {
        self.ai.is_some()
    }

    // ---- derived statistics (always recomputed) ----

    pub fn strength(&self) -> i32 {
        self.fighter.base_strength + self.equipment.stat_bonus(EnchantKind::Strength)
    }

    pub fn intelligence(&self) -> i32 {
        self.fighter.base_intelligence + self.equipment.stat_bonus(EnchantKind::Intelligence)
    }

    pub fn dexterity(&self) -> i32 {
        self.fighter.base_dexterity + self.equipment.stat_bonus(EnchantKind::Dexterity)
    }

    pub fn constitution(&self) -> i32 {
        self.fighter.base_constitution + self.equipment.stat_bonus(EnchantKind::Constitution)
    }

    /// Hit point capacity: base + constitution + HP enchants.
    pub fn max_hp(&self) -> i32 {
        self.fighter.base_hp + self.constitution() + self.equipment.stat_bonus(EnchantKind::Hp)
    }

    /// Mana capacity: base + intelligence + MP enchants.
    pub fn max_mp(&self) -> i32 {
        self.fighter.base_mp + self.intelligence() + self.equipment.stat_bonus(EnchantKind::Mp)
    }

    /// Total defense: base + worn piece defense + DEFENSE enchants.
    pub fn defense(&self) -> i32 {
        self.fighter.base_defense
            + self.equipment.equipped_defense()
            + self.equipment.stat_bonus(EnchantKind::Defense)
    }

    /// Summed life-leech percentage across equipped enchants.
    pub fn leech_percent(&self) -> i32 {
        self.equipment.stat_bonus(EnchantKind::Leech)
    }

    /// Damage range for a melee swing: the equipped weapon's (enchant
    /// adjusted) range, or the unarmed range.
    pub fn melee_damage_range(&self) -> (i32, i32) {
        match (self.equipment.min_damage(), self.equipment.max_damage()) {
            (Some(min), Some(max)) => (min, max),
            _ => (
                self.fighter.unarmed_min_damage,
                self.fighter.unarmed_max_damage,
            ),
        }
    }

    // ---- resource pools (clamped on every write) ----

    /// Current hit points, rounded for display.
    pub fn hp(&self) -> i32 {
        self.fighter.hp.round() as i32
    }

    /// Current mana, rounded for display.
    pub fn mp(&self) -> i32 {
        self.fighter.mp.round() as i32
    }

    pub fn set_hp(&mut self, value: f32) {
        let max = self.max_hp() as f32;
        self.fighter.hp = value.clamp(0.0, max);
    }

    pub fn set_mp(&mut self, value: f32) {
        let max = self.max_mp() as f32;
        self.fighter.mp = value.clamp(0.0, max);
    }

    /// Refill both pools to capacity.
    pub fn restore_all(&mut self) {
        self.fighter.hp = self.max_hp() as f32;
        self.fighter.mp = self.max_mp() as f32;
    }

    /// Heal up to `amount`, returning how much was actually recovered
    /// (0 at full health).
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp();
        if before >= self.max_hp() {
            return 0;
        }
        self.set_hp(self.fighter.hp + amount as f32);
        self.hp() - before
    }

    /// Restore up to `amount` mana, returning the recovered amount.
    pub fn restore_mp(&mut self, amount: i32) -> i32 {
        let before = self.mp();
        if before >= self.max_mp() {
            return 0;
        }
        self.set_mp(self.fighter.mp + amount as f32);
        self.mp() - before
    }

    // ---- equipment ----

    /// Equip or unequip an item the actor owns. Unequipping moves the item
    /// back into the inventory; equipping takes it out and returns any
    /// evicted occupant to the freed space. `quiet` suppresses messages
    /// during initial setup.
    pub fn toggle_equip(
        &mut self,
        item_id: ItemId,
        log: &mut dyn MessageSink,
        quiet: bool,
    ) -> ActionResult {
        if self.equipment.item_is_equipped(item_id) {
            if self.inventory.is_full() {
                return impossible("Your inventory is full.");
            }
            if let Some(item) = self.equipment.remove(item_id) {
                if !quiet {
                    log.push(
                        format!("You remove the {}.", item.name),
                        MessageCategory::Item,
                    );
                }
                self.inventory.add(item);
            }
            return Ok(());
        }

        let Some(item) = self.inventory.remove(item_id) else {
            return impossible("You are not carrying that.");
        };
        if item.equippable.is_none() {
            let reason = format!("The {} cannot be equipped.", item.name);
            self.inventory.add(item);
            return impossible(reason);
        }

        let name = item.name.clone();
        if let Some(evicted) = self.equipment.equip(item) {
            if !quiet {
                log.push(
                    format!("You remove the {}.", evicted.name),
                    MessageCategory::Item,
                );
            }
            // the slot we just emptied in the inventory guarantees room
            self.inventory.add(evicted);
        }
        if !quiet {
            log.push(format!("You equip the {}.", name), MessageCategory::Item);
        }
        Ok(())
    }

    // ---- progression ----

    /// Resolve a pending level-up with one stat allocation.
    pub fn allocate_level_up(&mut self, choice: LevelUpChoice, log: &mut dyn MessageSink) {
        debug_assert!(self.level.requires_level_up());
        let text = match choice {
            LevelUpChoice::MaxHp => {
                self.fighter.base_hp += 5;
                self.fighter.hp += 5.0;
                "Your health improves!"
            }
            LevelUpChoice::Strength => {
                self.fighter.base_strength += 1;
                "Your strength improves!"
            }
            LevelUpChoice::Intelligence => {
                self.fighter.base_intelligence += 1;
                "Your intelligence improves!"
            }
            LevelUpChoice::Dexterity => {
                self.fighter.base_dexterity += 1;
                "Your dexterity improves!"
            }
            LevelUpChoice::Constitution => {
                self.fighter.base_constitution += 1;
                self.fighter.hp += 1.0;
                "Your constitution improves!"
            }
        };
        log.push(text.to_string(), MessageCategory::Progress);
        self.level.level_up();
    }
}
