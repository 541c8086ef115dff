//! Embercrawl - turn resolution and character progression for a
//! single-player dungeon crawler
//!
//! The crate owns actors, items, equipment, enchants, abilities and the
//! xp ledger; map generation, rendering and input live in the embedding
//! game, talking to the core through the [`world::FloorMap`] and
//! [`log::MessageSink`] seams.

pub mod combat;
pub mod entities;
pub mod error;
pub mod game;
pub mod items;
pub mod log;
pub mod progression;
pub mod save;
pub mod world;

// Re-export commonly used types
pub use error::{ActionResult, GameError};
pub use game::{Action, ActorId, GameState};
pub use world::{FloorMap, Position};
