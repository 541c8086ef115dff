//! Game state
//!
//! Owns every actor and every item lying on the ground of the current
//! floor. Actors are stored in an arena indexed by [`ActorId`]; items move
//! between the ground, inventories and equip slots as plain owned values,
//! so exclusive ownership is guaranteed by construction.

use serde::{Deserialize, Serialize};

use crate::entities::actor::{Actor, RenderOrder};
use crate::items::Item;
use crate::log::{MessageCategory, MessageSink};
use crate::world::Position;

/// Stable handle to an actor in the arena. Actors are never removed;
/// corpses stay behind as inert entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub usize);

/// The complete mutable state of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    actors: Vec<Actor>,
    ground_items: Vec<(Position, Item)>,
    pub player: ActorId,
    /// Set once the final boss dies; terminal.
    pub win: bool,
}

impl GameState {
    /// A new run with the given player actor as the first arena entry.
    pub fn new(player: Actor) -> Self {
        Self {
            actors: vec![player],
            ground_items: Vec::new(),
            player: ActorId(0),
            win: false,
        }
    }

    /// Add an actor, returning its handle.
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        self.actors.push(actor);
        ActorId(self.actors.len() - 1)
    }

    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id.0]
    }

    pub fn actor_mut(&mut self, id: ActorId) -> &mut Actor {
        &mut self.actors[id.0]
    }

    pub fn player_actor(&self) -> &Actor {
        self.actor(self.player)
    }

    pub fn player_actor_mut(&mut self) -> &mut Actor {
        self.actor_mut(self.player)
    }

    /// All actors with their handles, corpses included.
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors
            .iter()
            .enumerate()
            .map(|(index, actor)| (ActorId(index), actor))
    }

    /// The living actor at a position, if any.
    pub fn actor_at(&self, pos: Position) -> Option<ActorId> {
        self.actors()
            .find(|(_, actor)| actor.pos == pos && actor.is_alive())
            .map(|(id, _)| id)
    }

    /// Whatever blocks movement at a position.
    pub fn blocking_entity_at(&self, pos: Position) -> Option<ActorId> {
        self.actors()
            .find(|(_, actor)| actor.pos == pos && actor.blocks_movement)
            .map(|(id, _)| id)
    }

    pub fn ground_items(&self) -> impl Iterator<Item = (Position, &Item)> {
        self.ground_items.iter().map(|(pos, item)| (*pos, item))
    }

    /// Drop an item onto the floor.
    pub fn place_item(&mut self, pos: Position, item: Item) {
        self.ground_items.push((pos, item));
    }

    /// Take the first ground item at a position, transferring ownership to
    /// the caller.
    pub fn take_item_at(&mut self, pos: Position) -> Option<Item> {
        let index = self
            .ground_items
            .iter()
            .position(|(item_pos, _)| *item_pos == pos)?;
        Some(self.ground_items.remove(index).1)
    }

    pub fn has_item_at(&self, pos: Position) -> bool {
        self.ground_items.iter().any(|(item_pos, _)| *item_pos == pos)
    }

    /// Names of everything non-blocking at a position: ground items and
    /// corpses. Used for the "you see here" message after a move.
    pub fn names_at(&self, pos: Position) -> Vec<String> {
        let mut names: Vec<String> = self
            .ground_items()
            .filter(|(item_pos, _)| *item_pos == pos)
            .map(|(_, item)| item.name.clone())
            .collect();
        names.extend(
            self.actors
                .iter()
                .filter(|actor| actor.pos == pos && !actor.blocks_movement)
                .map(|actor| actor.name.clone()),
        );
        names
    }

    /// Apply damage to an actor through the clamping setter and resolve
    /// death if its hit points ran out. The killer's ledger receives the
    /// victim's xp grant.
    pub fn apply_damage(
        &mut self,
        target: ActorId,
        amount: i32,
        killer: Option<ActorId>,
        log: &mut dyn MessageSink,
    ) {
        let actor = self.actor_mut(target);
        let hp = actor.fighter.hp_raw();
        actor.set_hp(hp - amount as f32);

        if actor.fighter.hp_raw() <= 0.0 && actor.is_alive() {
            self.kill(target, killer, log);
        }
    }

    /// Irreversible death resolution. The AI-presence guard in
    /// `apply_damage` makes sure this runs exactly once per actor: a
    /// corpse has no behavior left to die with.
    fn kill(&mut self, target: ActorId, killer: Option<ActorId>, log: &mut dyn MessageSink) {
        let is_player = target == self.player;
        let actor = self.actor_mut(target);
        let name = actor.name.clone();
        let xp = actor.level.xp_given;
        let boss = actor.boss;

        actor.glyph = '%';
        actor.color = (191, 0, 0);
        actor.blocks_movement = false;
        actor.ai = None;
        actor.render_order = RenderOrder::Corpse;
        actor.name = format!("remains of {}", name);

        if is_player {
            log.push("You died!".to_string(), MessageCategory::PlayerDeath);
        } else {
            log.push(format!("{} is dead!", name), MessageCategory::EnemyDeath);
        }
        log::debug!("{} died (boss: {})", name, boss);

        if boss {
            self.win = true;
        }

        if let Some(killer) = killer {
            self.actor_mut(killer).level.add_xp(xp, log);
        }
    }
}
