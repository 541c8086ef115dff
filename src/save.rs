//! Save and load
//!
//! The whole run serializes as a single JSON document. Loading restores
//! the state and bumps the global item ID counter past every ID in the
//! file, so items spawned after a load never collide with loaded ones.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::GameState;
use crate::items::item::bump_item_id_counter;
use crate::items::ItemId;
use crate::log::MessageLog;

/// Save file version for compatibility checking.
const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// One complete run: the state plus its message history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    version: u32,
    pub state: GameState,
    pub log: MessageLog,
}

impl SaveGame {
    pub fn new(state: GameState, log: MessageLog) -> Self {
        Self {
            version: SAVE_VERSION,
            state,
            log,
        }
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let save: SaveGame = serde_json::from_str(json)?;
        if save.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: save.version,
            });
        }

        if let Some(max_id) = max_item_id(&save.state) {
            bump_item_id_counter(max_id);
        }
        Ok(save)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), SaveError> {
        fs::write(path, self.to_json()?)?;
        log::info!("Game saved to {}", path.display());
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, SaveError> {
        let save = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Game loaded from {}", path.display());
        Ok(save)
    }
}

/// The largest item ID anywhere in the graph: ground, inventories and
/// equip slots.
fn max_item_id(state: &GameState) -> Option<ItemId> {
    let ground = state.ground_items().map(|(_, item)| item.id);
    let carried = state.actors().flat_map(|(_, actor)| {
        actor
            .inventory
            .items()
            .iter()
            .map(|item| item.id)
            .chain(actor.equipment.equipped_items().map(|item| item.id))
    });
    ground.chain(carried).max()
}
