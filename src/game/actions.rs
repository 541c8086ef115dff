//! Action layer
//!
//! One [`Action`] is one intent bound to one acting actor, resolved to
//! completion before the next intent is accepted. Player input and
//! monster AI submit the same vocabulary. Every failure is an
//! `Impossible` condition that aborts with no state change; the only
//! documented exception is mana already spent when a blink strike finds
//! no landing tile.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::abilities::{AbilityEnchant, AbilityKind, ScalingStat, TargetSpec};
use crate::combat::mitigate;
use crate::error::{impossible, ActionResult};
use crate::items::{Consumable, ItemId};
use crate::log::{MessageCategory, MessageSink};
use crate::world::{FloorMap, Position};

use super::state::{ActorId, GameState};

/// One turn's intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Do nothing this turn.
    Wait,
    /// Step by a delta; fails on walls, bounds and blockers.
    Movement { dx: i32, dy: i32 },
    /// Attack if someone is there, otherwise move. The directional
    /// primitive player input maps to.
    Bump { dx: i32, dy: i32 },
    /// Attack the actor at the adjacent destination.
    Melee { dx: i32, dy: i32 },
    /// Pick up an item from the actor's own tile.
    Pickup,
    /// Drop an item, unequipping it first if worn.
    Drop { item: ItemId },
    /// Equip or unequip an owned item.
    Equip { item: ItemId },
    /// Use a consumable, with an optional target coordinate.
    UseItem {
        item: ItemId,
        target: Option<Position>,
    },
    /// Cast an ability granted by equipment. Abilities with a targeting
    /// query carry the chosen coordinate; self-area casts need none.
    CastAbility {
        ability: AbilityKind,
        target: Option<Position>,
    },
    /// Ascend, if standing on the up staircase.
    UpStairs,
    /// Descend, if standing on the down staircase.
    DownStairs,
}

impl GameState {
    /// Resolve one intent. Turn-synchronous: the mutation completes (or
    /// nothing happens at all) before this returns.
    pub fn perform<M: FloorMap>(
        &mut self,
        actor: ActorId,
        action: Action,
        map: &mut M,
        rng: &mut impl Rng,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        debug_assert!(self.actor(actor).is_alive());
        log::trace!("resolving {:?} for actor {:?}", action, actor);

        match action {
            Action::Wait => Ok(()),
            Action::Movement { dx, dy } => self.movement(actor, dx, dy, map, log),
            Action::Bump { dx, dy } => {
                let dest = self.actor(actor).pos.offset(dx, dy);
                if self.actor_at(dest).is_some() {
                    self.melee(actor, dx, dy, rng, log)
                } else {
                    self.movement(actor, dx, dy, map, log)
                }
            }
            Action::Melee { dx, dy } => self.melee(actor, dx, dy, rng, log),
            Action::Pickup => self.pickup(actor, log),
            Action::Drop { item } => self.drop_item(actor, item, log),
            Action::Equip { item } => self.actor_mut(actor).toggle_equip(item, log, false),
            Action::UseItem { item, target } => self.use_item(actor, item, target, log),
            Action::CastAbility { ability, target } => {
                self.cast_ability(actor, ability, target, map, rng, log)
            }
            Action::UpStairs => self.take_stairs(actor, -1, map, log),
            Action::DownStairs => self.take_stairs(actor, 1, map, log),
        }
    }

    /// First phase of an ability cast: how the destination should be
    /// collected. The input collaborator re-enters with a `CastAbility`
    /// carrying the chosen coordinate, or never does (cancellation, which
    /// spends nothing because costs are only paid inside the cast).
    pub fn request_ability_target(
        &self,
        actor: ActorId,
        kind: AbilityKind,
    ) -> ActionResult<TargetSpec> {
        if self.actor(actor).equipment.ability(kind).is_none() {
            return impossible("You don't know that ability.");
        }
        Ok(kind.target_spec())
    }

    fn movement<M: FloorMap>(
        &mut self,
        actor_id: ActorId,
        dx: i32,
        dy: i32,
        map: &M,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let dest = self.actor(actor_id).pos.offset(dx, dy);

        if !map.in_bounds(dest) || !map.is_walkable(dest) {
            return impossible("That way is blocked.");
        }
        if self.blocking_entity_at(dest).is_some() {
            return impossible("That way is blocked.");
        }

        if actor_id == self.player {
            let names = self.names_at(dest);
            if !names.is_empty() {
                log.push(
                    format!("You see here: {}", names.join(", ")),
                    MessageCategory::Info,
                );
            }
        }

        self.actor_mut(actor_id).pos = dest;
        Ok(())
    }

    fn melee(
        &mut self,
        attacker_id: ActorId,
        dx: i32,
        dy: i32,
        rng: &mut impl Rng,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let dest = self.actor(attacker_id).pos.offset(dx, dy);
        let Some(target_id) = self.actor_at(dest) else {
            return impossible("Nothing to attack.");
        };

        let attacker = self.actor(attacker_id);
        let (min, max) = attacker.melee_damage_range();
        let leech_percent = attacker.leech_percent();
        let attack_desc = format!("{} attacks {}", attacker.name, self.actor(target_id).name);
        let defense = self.actor(target_id).defense();

        let roll = rng.gen_range(min..=max);
        let mut damage = mitigate(roll, defense);

        // one empowered charge is consumed per attack
        {
            let attacker = self.actor_mut(attacker_id);
            if attacker.fighter.empowered > 0 {
                damage *= 2;
                attacker.fighter.empowered -= 1;
            }
        }

        let category = if attacker_id == self.player {
            MessageCategory::PlayerAttack
        } else {
            MessageCategory::EnemyAttack
        };

        if damage > 0 {
            log.push(
                format!("{} for {} hit points.", attack_desc, damage),
                category,
            );
            self.apply_damage(target_id, damage, Some(attacker_id), log);

            // leech applies after mitigation, weapon or not; the clamping
            // setter caps the gain at max hp
            if leech_percent > 0 {
                let gain = leech_percent as f32 / 100.0 * damage as f32;
                let attacker = self.actor_mut(attacker_id);
                let hp = attacker.fighter.hp_raw();
                attacker.set_hp(hp + gain);
            }
        } else {
            log.push(format!("{} but does no damage.", attack_desc), category);
        }
        Ok(())
    }

    fn pickup(&mut self, actor_id: ActorId, log: &mut dyn MessageSink) -> ActionResult {
        let pos = self.actor(actor_id).pos;
        if !self.has_item_at(pos) {
            return impossible("There is nothing here to pick up.");
        }
        // capacity is the raw item count, not the stacked display count
        if self.actor(actor_id).inventory.is_full() {
            return impossible("Your inventory is full.");
        }

        let Some(item) = self.take_item_at(pos) else {
            return impossible("There is nothing here to pick up.");
        };
        log.push(
            format!("You picked up the {}!", item.name),
            MessageCategory::Item,
        );
        self.actor_mut(actor_id).inventory.add(item);
        Ok(())
    }

    fn drop_item(
        &mut self,
        actor_id: ActorId,
        item_id: ItemId,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let pos = self.actor(actor_id).pos;
        let item = {
            let actor = self.actor_mut(actor_id);
            if let Some(item) = actor.equipment.remove(item_id) {
                // worn items come off before they hit the floor
                log.push(
                    format!("You remove the {}.", item.name),
                    MessageCategory::Item,
                );
                item
            } else if let Some(item) = actor.inventory.remove(item_id) {
                item
            } else {
                return impossible("You are not carrying that.");
            }
        };

        log.push(
            format!("You dropped the {}.", item.name),
            MessageCategory::Item,
        );
        self.place_item(pos, item);
        Ok(())
    }

    fn use_item(
        &mut self,
        actor_id: ActorId,
        item_id: ItemId,
        _target: Option<Position>,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let actor = self.actor(actor_id);
        let Some(item) = actor.inventory.get(item_id) else {
            return impossible("You are not carrying that.");
        };
        let Some(effect) = item.consumable else {
            return impossible(format!("The {} cannot be used.", item.name));
        };
        let name = item.name.clone();

        match effect {
            Consumable::Healing { amount } => {
                let recovered = self.actor_mut(actor_id).heal(amount);
                if recovered == 0 {
                    return impossible("Your health is already full.");
                }
                log.push(
                    format!("You consume the {}, and recover {} HP!", name, recovered),
                    MessageCategory::Item,
                );
            }
            Consumable::ManaRestore { amount } => {
                let recovered = self.actor_mut(actor_id).restore_mp(amount);
                if recovered == 0 {
                    return impossible("Your mana is already full.");
                }
                log.push(
                    format!("You consume the {}, and recover {} MP!", name, recovered),
                    MessageCategory::Item,
                );
            }
            Consumable::Empower { charges } => {
                self.actor_mut(actor_id).fighter.empowered += charges;
                log.push(
                    format!("You read the {}. Your attacks surge with fury!", name),
                    MessageCategory::Item,
                );
            }
        }

        // single-use: consumed only once the effect actually resolved
        self.actor_mut(actor_id).inventory.remove(item_id);
        Ok(())
    }

    fn cast_ability<M: FloorMap>(
        &mut self,
        caster_id: ActorId,
        kind: AbilityKind,
        target: Option<Position>,
        map: &M,
        rng: &mut impl Rng,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let caster = self.actor(caster_id);
        let Some(ability) = caster.equipment.ability(kind) else {
            return impossible("You don't know that ability.");
        };

        let spec = kind.target_spec();
        let dest = match spec {
            TargetSpec::SelfArea { .. } => caster.pos,
            TargetSpec::Line | TargetSpec::Single => {
                let Some(dest) = target else {
                    return impossible("No target selected.");
                };
                if !map.in_bounds(dest) {
                    return impossible("That is out of range.");
                }
                dest
            }
        };

        // a single-target cast needs a victim before anything is spent
        if spec == TargetSpec::Single && self.actor_at(dest).is_none() {
            return impossible("There is nothing to strike there.");
        }

        // mana gate; once deducted, a failed resolution does not refund
        if self.actor(caster_id).mp() < ability.mana_cost {
            return impossible("Not enough mana.");
        }
        {
            let caster = self.actor_mut(caster_id);
            let mp = caster.fighter.mp_raw();
            caster.set_mp(mp - ability.mana_cost as f32);
        }

        match spec {
            TargetSpec::SelfArea { radius } => self.resolve_area(caster_id, &ability, radius, log),
            TargetSpec::Line => self.resolve_line(caster_id, &ability, dest, map, log),
            TargetSpec::Single => self.resolve_blink(caster_id, &ability, dest, map, rng, log),
        }
    }

    /// `ability.level * scaling attribute`, read fresh per hit.
    fn ability_power(&self, caster_id: ActorId, ability: &AbilityEnchant) -> i32 {
        let caster = self.actor(caster_id);
        let attribute = match ability.kind.scaling_stat() {
            ScalingStat::Strength => caster.strength(),
            ScalingStat::Intelligence => caster.intelligence(),
            ScalingStat::Dexterity => caster.dexterity(),
        };
        ability.level * attribute
    }

    fn resolve_area(
        &mut self,
        caster_id: ActorId,
        ability: &AbilityEnchant,
        radius: i32,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let center = self.actor(caster_id).pos;
        let targets: Vec<ActorId> = self
            .actors()
            .filter(|(id, actor)| {
                *id != caster_id
                    && actor.is_alive()
                    && actor.pos.chebyshev_distance(center) <= radius
            })
            .map(|(id, _)| id)
            .collect();

        if targets.is_empty() {
            log.push(
                format!("The {} strikes nothing but air.", ability.kind.name()),
                MessageCategory::Ability,
            );
            return Ok(());
        }

        for target in targets {
            let power = self.ability_power(caster_id, ability);
            let name = self.actor(target).name.clone();
            log.push(
                format!(
                    "The {} tears into {} for {} hit points!",
                    ability.kind.name(),
                    name,
                    power
                ),
                MessageCategory::Ability,
            );
            self.apply_damage(target, power, Some(caster_id), log);
        }
        Ok(())
    }

    fn resolve_line<M: FloorMap>(
        &mut self,
        caster_id: ActorId,
        ability: &AbilityEnchant,
        dest: Position,
        map: &M,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let origin = self.actor(caster_id).pos;
        let mut hits = Vec::new();
        for pos in origin.line_to(dest).into_iter().skip(1) {
            // beams stop at walls, not at bodies
            if !map.in_bounds(pos) || !map.is_walkable(pos) {
                break;
            }
            if let Some(target) = self.actor_at(pos) {
                if target != caster_id {
                    hits.push(target);
                }
            }
        }

        for target in hits {
            let power = self.ability_power(caster_id, ability);
            let name = self.actor(target).name.clone();
            log.push(
                format!(
                    "The {} sears {} for {} hit points!",
                    ability.kind.name(),
                    name,
                    power
                ),
                MessageCategory::Ability,
            );
            self.apply_damage(target, power, Some(caster_id), log);
        }
        Ok(())
    }

    fn resolve_blink<M: FloorMap>(
        &mut self,
        caster_id: ActorId,
        ability: &AbilityEnchant,
        dest: Position,
        map: &M,
        rng: &mut impl Rng,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let Some(target) = self.actor_at(dest) else {
            return impossible("There is nothing to strike there.");
        };

        // any open tile in the 3x3 neighborhood of the victim
        let mut candidates = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                let pos = dest.offset(dx, dy);
                if pos == dest {
                    continue;
                }
                if map.in_bounds(pos)
                    && map.is_walkable(pos)
                    && self.blocking_entity_at(pos).is_none()
                {
                    candidates.push(pos);
                }
            }
        }
        if candidates.is_empty() {
            // the mana stays spent: the cast was activated, it just fizzled
            return impossible("There is no open ground to blink to.");
        }

        let landing = candidates[rng.gen_range(0..candidates.len())];
        self.actor_mut(caster_id).pos = landing;

        let power = self.ability_power(caster_id, ability);
        let name = self.actor(target).name.clone();
        log.push(
            format!(
                "You blink through the shadows and strike {} for {} hit points!",
                name, power
            ),
            MessageCategory::Ability,
        );
        self.apply_damage(target, power, Some(caster_id), log);
        Ok(())
    }

    fn take_stairs<M: FloorMap>(
        &mut self,
        actor_id: ActorId,
        delta: i32,
        map: &mut M,
        log: &mut dyn MessageSink,
    ) -> ActionResult {
        let pos = self.actor(actor_id).pos;
        let stairs = if delta > 0 {
            map.downstairs()
        } else {
            map.upstairs()
        };
        if stairs != Some(pos) {
            return impossible("There are no stairs here.");
        }

        map.move_floor(delta);
        let text = if delta > 0 {
            "You descend the staircase."
        } else {
            "You ascend the staircase."
        };
        log.push(text.to_string(), MessageCategory::Stairs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::templates;
    use crate::items::enchant::Enchant;
    use crate::items::equippable::{EquipSlot, Equippable};
    use crate::items::Item;
    use crate::log::MessageLog;
    use crate::world::GridMap;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn setup() -> (GameState, GridMap, MessageLog) {
        let state = GameState::new(templates::player().spawn_at(Position::new(1, 1)));
        (state, GridMap::new(10, 10), MessageLog::new())
    }

    fn fixed_weapon(min: i32, max: i32) -> Item {
        Item::equipment(
            "Test Blade",
            '/',
            (255, 255, 255),
            Equippable::weapon(min, max),
        )
    }

    fn circlet_with(enchant: Enchant) -> Item {
        let mut equippable = Equippable::armor_piece(EquipSlot::Head, 0);
        equippable.enchants.push(enchant);
        Item::equipment("Circlet", '[', (139, 69, 19), equippable)
    }

    fn equip(state: &mut GameState, id: ActorId, item: Item) {
        let item_id = item.id;
        let mut log = MessageLog::new();
        let actor = state.actor_mut(id);
        actor.inventory.add(item);
        actor
            .toggle_equip(item_id, &mut log, true)
            .unwrap();
    }

    #[test]
    fn movement_fails_on_bounds_walls_and_blockers() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        state.spawn(templates::orc().spawn_at(Position::new(2, 1)));
        map.set_walkable(Position::new(1, 0), false);

        for (dx, dy) in [(0, -1), (1, 0)] {
            let result = state.perform(
                player,
                Action::Movement { dx, dy },
                &mut map,
                &mut rng(),
                &mut log,
            );
            assert_eq!(result.unwrap_err().to_string(), "That way is blocked.");
            assert_eq!(state.player_actor().pos, Position::new(1, 1));
        }

        state.player_actor_mut().pos = Position::new(0, 0);
        let result = state.perform(
            player,
            Action::Movement { dx: -1, dy: 0 },
            &mut map,
            &mut rng(),
            &mut log,
        );
        assert!(result.is_err());
        assert_eq!(state.player_actor().pos, Position::new(0, 0));
    }

    #[test]
    fn moving_onto_items_reports_them() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        state.place_item(Position::new(2, 1), templates::health_potion());

        state
            .perform(
                player,
                Action::Movement { dx: 1, dy: 0 },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        assert_eq!(state.player_actor().pos, Position::new(2, 1));
        assert!(log.contains("You see here: Health Potion"));
    }

    #[test]
    fn bump_attacks_occupied_tiles_and_moves_otherwise() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        state.spawn(templates::orc().spawn_at(Position::new(2, 1)));

        state
            .perform(
                player,
                Action::Bump { dx: 1, dy: 0 },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();
        assert!(log.contains("Player attacks Orc"));
        assert_eq!(state.player_actor().pos, Position::new(1, 1));

        state
            .perform(
                player,
                Action::Bump { dx: 0, dy: 1 },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();
        assert_eq!(state.player_actor().pos, Position::new(1, 2));
    }

    #[test]
    fn melee_into_empty_air_is_impossible() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let result = state.perform(
            player,
            Action::Melee { dx: 0, dy: 1 },
            &mut map,
            &mut rng(),
            &mut log,
        );
        assert_eq!(result.unwrap_err().to_string(), "Nothing to attack.");
    }

    #[test]
    fn melee_damage_is_mitigated_by_defense() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let troll = state.spawn(templates::troll().spawn_at(Position::new(2, 1)));
        state.actor_mut(troll).fighter.base_defense = 100;
        equip(&mut state, player, fixed_weapon(10, 10));

        state
            .perform(
                player,
                Action::Melee { dx: 1, dy: 0 },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        // ceil(10 * 100 / 200) = 5 against 100 defense
        assert!(log.contains("Player attacks Troll for 5 hit points."));
        assert_eq!(state.actor(troll).hp(), state.actor(troll).max_hp() - 5);
    }

    #[test]
    fn empowered_charges_double_one_attack_each() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let orc = state.spawn(templates::orc().spawn_at(Position::new(2, 1)));
        state.actor_mut(orc).fighter.base_hp = 100;
        state.actor_mut(orc).restore_all();
        equip(&mut state, player, fixed_weapon(6, 6));
        state.player_actor_mut().fighter.empowered = 1;

        state
            .perform(
                player,
                Action::Melee { dx: 1, dy: 0 },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();
        assert_eq!(state.actor(orc).hp(), state.actor(orc).max_hp() - 12);
        assert_eq!(state.player_actor().fighter.empowered, 0);

        state
            .perform(
                player,
                Action::Melee { dx: 1, dy: 0 },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();
        assert_eq!(state.actor(orc).hp(), state.actor(orc).max_hp() - 18);
    }

    #[test]
    fn harmless_attacks_are_logged_without_damage() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let orc = state.spawn(templates::orc().spawn_at(Position::new(2, 1)));
        equip(&mut state, player, fixed_weapon(0, 0));

        state
            .perform(
                player,
                Action::Melee { dx: 1, dy: 0 },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        assert!(log.contains("Player attacks Orc but does no damage."));
        assert_eq!(state.actor(orc).hp(), state.actor(orc).max_hp());
    }

    #[test]
    fn leech_heals_the_attacker_after_mitigation() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        state.spawn(templates::orc().spawn_at(Position::new(2, 1)));
        equip(&mut state, player, fixed_weapon(10, 10));
        equip(&mut state, player, circlet_with(Enchant::Leech { bonus: 20 }));
        state.player_actor_mut().set_hp(10.0);

        state
            .perform(
                player,
                Action::Melee { dx: 1, dy: 0 },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        // 20% of 10 damage is 2 hit points back
        assert_eq!(state.player_actor().hp(), 12);
    }

    #[test]
    fn pickup_needs_an_item_underfoot() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let result = state.perform(player, Action::Pickup, &mut map, &mut rng(), &mut log);
        assert_eq!(
            result.unwrap_err().to_string(),
            "There is nothing here to pick up."
        );
    }

    #[test]
    fn pickup_transfers_the_item() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let potion = templates::health_potion();
        let potion_id = potion.id;
        state.place_item(Position::new(1, 1), potion);

        state
            .perform(player, Action::Pickup, &mut map, &mut rng(), &mut log)
            .unwrap();

        assert!(log.contains("You picked up the Health Potion!"));
        assert!(state.player_actor().inventory.contains(potion_id));
        assert!(!state.has_item_at(Position::new(1, 1)));
    }

    #[test]
    fn pickup_capacity_counts_raw_items_not_stacks() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        state.player_actor_mut().inventory.capacity = 3;
        for _ in 0..3 {
            state
                .player_actor_mut()
                .inventory
                .add(templates::health_potion());
        }
        state.place_item(Position::new(1, 1), templates::health_potion());

        let result = state.perform(player, Action::Pickup, &mut map, &mut rng(), &mut log);
        assert_eq!(result.unwrap_err().to_string(), "Your inventory is full.");
        assert!(state.has_item_at(Position::new(1, 1)));
    }

    #[test]
    fn dropping_worn_gear_unequips_it_first() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        templates::give_starting_kit(state.player_actor_mut(), &mut log);
        let dagger_id = state
            .player_actor()
            .equipment
            .get(EquipSlot::Weapon)
            .map(|item| item.id)
            .unwrap();

        state
            .perform(
                player,
                Action::Drop { item: dagger_id },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        assert!(log.contains("You remove the Dagger."));
        assert!(log.contains("You dropped the Dagger."));
        assert!(state.player_actor().equipment.get(EquipSlot::Weapon).is_none());
        assert!(state.has_item_at(Position::new(1, 1)));
        // back to bare fists
        assert_eq!(state.player_actor().melee_damage_range(), (1, 2));
    }

    #[test]
    fn drinking_at_full_health_keeps_the_potion() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let potion = templates::health_potion();
        let potion_id = potion.id;
        state.player_actor_mut().inventory.add(potion);

        let result = state.perform(
            player,
            Action::UseItem {
                item: potion_id,
                target: None,
            },
            &mut map,
            &mut rng(),
            &mut log,
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "Your health is already full."
        );
        assert!(state.player_actor().inventory.contains(potion_id));

        state.player_actor_mut().set_hp(10.0);
        state
            .perform(
                player,
                Action::UseItem {
                    item: potion_id,
                    target: None,
                },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();
        assert_eq!(state.player_actor().hp(), 15);
        assert!(log.contains("recover 5 HP"));
        assert!(!state.player_actor().inventory.contains(potion_id));
    }

    #[test]
    fn fury_scroll_grants_empowered_charges() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let scroll = templates::fury_scroll();
        let scroll_id = scroll.id;
        state.player_actor_mut().inventory.add(scroll);

        state
            .perform(
                player,
                Action::UseItem {
                    item: scroll_id,
                    target: None,
                },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        assert_eq!(state.player_actor().fighter.empowered, 3);
        assert!(!state.player_actor().inventory.contains(scroll_id));
    }

    #[test]
    fn casting_requires_the_ability_on_equipment() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let result = state.perform(
            player,
            Action::CastAbility {
                ability: AbilityKind::Whirlwind,
                target: None,
            },
            &mut map,
            &mut rng(),
            &mut log,
        );
        assert_eq!(
            result.unwrap_err().to_string(),
            "You don't know that ability."
        );
        assert!(state
            .request_ability_target(player, AbilityKind::Whirlwind)
            .is_err());
    }

    #[test]
    fn targeting_request_spends_nothing() {
        let (mut state, _, _) = setup();
        let player = state.player;
        equip(
            &mut state,
            player,
            circlet_with(Enchant::Ability(AbilityEnchant::new(
                AbilityKind::BlinkStrike,
            ))),
        );

        let spec = state
            .request_ability_target(player, AbilityKind::BlinkStrike)
            .unwrap();
        assert_eq!(spec, TargetSpec::Single);
        assert_eq!(state.player_actor().mp(), state.player_actor().max_mp());
    }

    #[test]
    fn casting_without_mana_fails_cleanly() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        equip(
            &mut state,
            player,
            circlet_with(Enchant::Ability(AbilityEnchant::new(AbilityKind::Whirlwind))),
        );
        state.player_actor_mut().set_mp(5.0);

        let result = state.perform(
            player,
            Action::CastAbility {
                ability: AbilityKind::Whirlwind,
                target: None,
            },
            &mut map,
            &mut rng(),
            &mut log,
        );
        assert_eq!(result.unwrap_err().to_string(), "Not enough mana.");
        assert_eq!(state.player_actor().mp(), 5);
    }

    #[test]
    fn whirlwind_hits_every_adjacent_enemy() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let near = state.spawn(templates::orc().spawn_at(Position::new(2, 1)));
        let diagonal = state.spawn(templates::orc().spawn_at(Position::new(2, 2)));
        let far = state.spawn(templates::orc().spawn_at(Position::new(5, 5)));
        equip(
            &mut state,
            player,
            circlet_with(Enchant::Ability(AbilityEnchant::new(AbilityKind::Whirlwind))),
        );

        state
            .perform(
                player,
                Action::CastAbility {
                    ability: AbilityKind::Whirlwind,
                    target: None,
                },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        // level 1 times strength 5
        assert_eq!(state.actor(near).hp(), state.actor(near).max_hp() - 5);
        assert_eq!(state.actor(diagonal).hp(), state.actor(diagonal).max_hp() - 5);
        assert_eq!(state.actor(far).hp(), state.actor(far).max_hp());
        assert_eq!(state.player_actor().mp(), state.player_actor().max_mp() - 8);
    }

    #[test]
    fn arcane_beam_pierces_everything_on_the_line() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let first = state.spawn(templates::orc().spawn_at(Position::new(3, 1)));
        let second = state.spawn(templates::orc().spawn_at(Position::new(5, 1)));
        equip(
            &mut state,
            player,
            circlet_with(Enchant::Ability(AbilityEnchant::new(AbilityKind::ArcaneBeam))),
        );

        state
            .perform(
                player,
                Action::CastAbility {
                    ability: AbilityKind::ArcaneBeam,
                    target: Some(Position::new(6, 1)),
                },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        // level 1 times intelligence 5, no mitigation
        assert_eq!(state.actor(first).hp(), state.actor(first).max_hp() - 5);
        assert_eq!(state.actor(second).hp(), state.actor(second).max_hp() - 5);
        assert_eq!(state.player_actor().mp(), state.player_actor().max_mp() - 10);
    }

    #[test]
    fn arcane_beam_stops_at_walls() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let before = state.spawn(templates::orc().spawn_at(Position::new(3, 1)));
        let behind = state.spawn(templates::orc().spawn_at(Position::new(5, 1)));
        map.set_walkable(Position::new(4, 1), false);
        equip(
            &mut state,
            player,
            circlet_with(Enchant::Ability(AbilityEnchant::new(AbilityKind::ArcaneBeam))),
        );

        state
            .perform(
                player,
                Action::CastAbility {
                    ability: AbilityKind::ArcaneBeam,
                    target: Some(Position::new(6, 1)),
                },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        assert_eq!(state.actor(before).hp(), state.actor(before).max_hp() - 5);
        assert_eq!(state.actor(behind).hp(), state.actor(behind).max_hp());
    }

    #[test]
    fn blink_strike_teleports_next_to_the_victim() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        let orc = state.spawn(templates::orc().spawn_at(Position::new(5, 5)));
        // wall off every neighbor except one landing tile
        for dx in -1..=1 {
            for dy in -1..=1 {
                if (dx, dy) != (0, 0) && (dx, dy) != (-1, 0) {
                    map.set_walkable(Position::new(5 + dx, 5 + dy), false);
                }
            }
        }
        equip(
            &mut state,
            player,
            circlet_with(Enchant::Ability(AbilityEnchant::new(
                AbilityKind::BlinkStrike,
            ))),
        );

        state
            .perform(
                player,
                Action::CastAbility {
                    ability: AbilityKind::BlinkStrike,
                    target: Some(Position::new(5, 5)),
                },
                &mut map,
                &mut rng(),
                &mut log,
            )
            .unwrap();

        assert_eq!(state.player_actor().pos, Position::new(4, 5));
        // level 1 times dexterity 5
        assert_eq!(state.actor(orc).hp(), state.actor(orc).max_hp() - 5);
        assert_eq!(state.player_actor().mp(), state.player_actor().max_mp() - 12);
    }

    #[test]
    fn blink_with_no_landing_tile_keeps_the_mana_spent() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        state.spawn(templates::orc().spawn_at(Position::new(5, 5)));
        for dx in -1..=1 {
            for dy in -1..=1 {
                if (dx, dy) != (0, 0) {
                    map.set_walkable(Position::new(5 + dx, 5 + dy), false);
                }
            }
        }
        equip(
            &mut state,
            player,
            circlet_with(Enchant::Ability(AbilityEnchant::new(
                AbilityKind::BlinkStrike,
            ))),
        );

        let result = state.perform(
            player,
            Action::CastAbility {
                ability: AbilityKind::BlinkStrike,
                target: Some(Position::new(5, 5)),
            },
            &mut map,
            &mut rng(),
            &mut log,
        );

        assert_eq!(
            result.unwrap_err().to_string(),
            "There is no open ground to blink to."
        );
        assert_eq!(state.player_actor().pos, Position::new(1, 1));
        assert_eq!(state.player_actor().mp(), state.player_actor().max_mp() - 12);
    }

    #[test]
    fn stairs_only_work_on_their_tile() {
        let (mut state, mut map, mut log) = setup();
        let player = state.player;
        map.downstairs = Some(Position::new(3, 3));

        let result = state.perform(player, Action::DownStairs, &mut map, &mut rng(), &mut log);
        assert_eq!(result.unwrap_err().to_string(), "There are no stairs here.");
        assert_eq!(map.floor, 1);

        state.player_actor_mut().pos = Position::new(3, 3);
        state
            .perform(player, Action::DownStairs, &mut map, &mut rng(), &mut log)
            .unwrap();
        assert_eq!(map.floor, 2);
        assert!(log.contains("You descend the staircase."));

        map.upstairs = Some(Position::new(3, 3));
        state
            .perform(player, Action::UpStairs, &mut map, &mut rng(), &mut log)
            .unwrap();
        assert_eq!(map.floor, 1);
        assert!(log.contains("You ascend the staircase."));
    }
}
