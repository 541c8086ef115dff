//! Inventory container
//!
//! A capacity-bounded bag of owned items. Capacity is enforced against the
//! raw item count; the stacked view exists purely for display, where
//! identical stackables collapse into one counted entry.

use serde::{Deserialize, Serialize};

use super::equipment::Equipment;
use super::item::{Item, ItemId};

/// One entry of the stacked display view.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack<'a> {
    pub item: &'a Item,
    pub count: usize,
    pub equipped: bool,
}

/// A capacity-bounded item collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
    items: Vec<Item>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    /// Raw (unstacked) item count; this is what capacity is checked
    /// against.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Add an item. Callers check capacity first; the action layer turns
    /// a full inventory into an Impossible failure before ownership moves.
    pub fn add(&mut self, item: Item) {
        debug_assert!(self.items.len() < self.capacity);
        self.items.push(item);
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Take an item out by identity.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// The display view: equipped items plus carried items, sorted
    /// descending by sort key (item name, equipped items prefixed so they
    /// sort to the top), with consecutive stackable same-name items merged
    /// into a single counted entry. The length of this view is the
    /// *stacked* count, independent of the raw count capacity works on.
    pub fn sorted_stacked_items<'a>(&'a self, equipment: &'a Equipment) -> Vec<ItemStack<'a>> {
        let mut entries: Vec<(&Item, bool)> = equipment
            .equipped_items()
            .map(|item| (item, true))
            .chain(self.items.iter().map(|item| (item, false)))
            .collect();
        entries.sort_by(|a, b| Self::sort_key(b).cmp(&Self::sort_key(a)));

        let mut stacked: Vec<ItemStack<'a>> = Vec::new();
        for (item, equipped) in entries {
            match stacked.last_mut() {
                Some(previous)
                    if item.stackable
                        && previous.item.stackable
                        && previous.item.name == item.name =>
                {
                    previous.count += 1;
                }
                _ => stacked.push(ItemStack {
                    item,
                    count: 1,
                    equipped,
                }),
            }
        }
        stacked
    }

    fn sort_key((item, equipped): &(&Item, bool)) -> String {
        if *equipped {
            format!("__{}", item.name)
        } else {
            item.name.clone()
        }
    }
}
