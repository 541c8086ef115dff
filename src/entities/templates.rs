//! Actor and item templates
//!
//! Spawnable content. The numbers here are data, not design; they mirror
//! a small starter bestiary and item set. Actors spawn via
//! `Actor::spawn_at`, items via `Item::spawn`.

use crate::combat::Fighter;
use crate::entities::actor::{Actor, AiBehavior};
use crate::items::equippable::{EquipSlot, Equippable};
use crate::items::item::{Consumable, Item};
use crate::log::MessageSink;
use crate::progression::Level;

// ---- actors ----

pub fn player() -> Actor {
    Actor::new(
        "Player",
        '@',
        (255, 255, 255),
        AiBehavior::Player,
        Fighter::new(30, 10, 2, 1, 2).with_attributes(5, 5, 5, 5),
        26,
        Level::leveling(),
    )
}

pub fn orc() -> Actor {
    Actor::new(
        "Orc",
        'o',
        (63, 127, 63),
        AiBehavior::Hostile,
        Fighter::new(8, 0, 0, 1, 4).with_attributes(3, 1, 2, 2),
        0,
        Level::xp_reward(20),
    )
}

pub fn troll() -> Actor {
    Actor::new(
        "Troll",
        'T',
        (0, 127, 0),
        AiBehavior::Hostile,
        Fighter::new(12, 0, 4, 4, 10).with_attributes(6, 1, 2, 4),
        0,
        Level::xp_reward(40),
    )
}

pub fn ogre() -> Actor {
    Actor::new(
        "Ogre",
        'O',
        (168, 52, 235),
        AiBehavior::Hostile,
        Fighter::new(20, 0, 8, 15, 25).with_attributes(9, 1, 3, 6),
        0,
        Level::xp_reward(80),
    )
}

/// The final boss; slaying it sets the win flag.
pub fn dragon() -> Actor {
    Actor::new(
        "Dragon",
        'D',
        (31, 112, 22),
        AiBehavior::Hostile,
        Fighter::new(40, 0, 10, 20, 30).with_attributes(12, 4, 5, 8),
        0,
        Level::xp_reward(160),
    )
    .with_boss_flag()
}

// ---- consumables ----

pub fn health_potion() -> Item {
    Item::consumable(
        "Health Potion",
        '!',
        (127, 0, 255),
        Consumable::Healing { amount: 5 },
    )
}

pub fn super_health_potion() -> Item {
    Item::consumable(
        "Super Health Potion",
        '!',
        (163, 31, 31),
        Consumable::Healing { amount: 20 },
    )
}

pub fn mana_potion() -> Item {
    Item::consumable(
        "Mana Potion",
        '!',
        (0, 127, 255),
        Consumable::ManaRestore { amount: 10 },
    )
}

/// Grants empowered attack charges.
pub fn fury_scroll() -> Item {
    Item::consumable(
        "Scroll of Fury",
        '~',
        (255, 128, 0),
        Consumable::Empower { charges: 3 },
    )
}

// ---- equipment ----

pub fn dagger() -> Item {
    Item::equipment("Dagger", '/', (0, 191, 255), Equippable::weapon(1, 4))
}

pub fn sword() -> Item {
    Item::equipment("Sword", '/', (255, 255, 255), Equippable::weapon(1, 8))
}

pub fn leather_armor() -> Item {
    Item::equipment(
        "Leather Armor",
        '[',
        (139, 69, 19),
        Equippable::armor_piece(EquipSlot::Armor, 3),
    )
}

pub fn chain_mail() -> Item {
    Item::equipment(
        "Chain Mail",
        '[',
        (139, 69, 19),
        Equippable::armor_piece(EquipSlot::Armor, 6),
    )
}

pub fn helmet() -> Item {
    Item::equipment(
        "Helmet",
        '[',
        (139, 69, 19),
        Equippable::armor_piece(EquipSlot::Head, 2),
    )
}

pub fn gloves() -> Item {
    Item::equipment(
        "Gloves",
        '[',
        (139, 69, 19),
        Equippable::armor_piece(EquipSlot::Hands, 2),
    )
}

pub fn greaves() -> Item {
    Item::equipment(
        "Greaves",
        '[',
        (139, 69, 19),
        Equippable::armor_piece(EquipSlot::Pants, 2),
    )
}

pub fn boots() -> Item {
    Item::equipment(
        "Boots",
        '[',
        (139, 69, 19),
        Equippable::armor_piece(EquipSlot::Shoes, 2),
    )
}

/// Hand a fresh player its starting kit: a common dagger and leather
/// armor, equipped without messages.
pub fn give_starting_kit(player: &mut Actor, log: &mut dyn MessageSink) {
    for item in [dagger(), leather_armor()] {
        let id = item.id;
        player.inventory.add(item);
        // both slots are empty and both items are equippable
        let _ = player.toggle_equip(id, log, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MessageLog;

    #[test]
    fn starting_kit_is_equipped_silently() {
        let mut hero = player();
        let mut log = MessageLog::new();
        give_starting_kit(&mut hero, &mut log);

        assert!(hero.equipment.get(EquipSlot::Weapon).is_some());
        assert!(hero.equipment.get(EquipSlot::Armor).is_some());
        assert!(hero.inventory.is_empty());
        assert!(log.messages().is_empty());
        // dagger 1-4 and leather armor defense 3 at common/ilvl 0
        assert_eq!(hero.melee_damage_range(), (1, 4));
        assert_eq!(hero.defense(), 5); // 2 base + 3 armor
    }

    #[test]
    fn boss_flag_only_on_the_dragon() {
        assert!(dragon().boss);
        assert!(!orc().boss);
        assert!(!player().boss);
    }

    #[test]
    fn monsters_grant_xp_but_never_level() {
        let troll = troll();
        assert_eq!(troll.level.xp_given, 40);
        assert_eq!(troll.level.level_up_factor, 0);
    }
}
