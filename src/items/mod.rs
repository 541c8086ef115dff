//! Item system

pub mod enchant;
pub mod equipment;
pub mod equippable;
pub mod inventory;
pub mod item;
pub mod rarity;

pub use enchant::{Enchant, EnchantKind};
pub use equipment::Equipment;
pub use equippable::{EquipSlot, Equippable};
pub use inventory::{Inventory, ItemStack};
pub use item::{next_item_id, Consumable, Item, ItemId};
pub use rarity::{Rarity, RarityWeights};
