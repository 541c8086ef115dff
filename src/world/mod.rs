//! World interface
//!
//! The core never generates or stores tiles itself; it talks to the dungeon
//! through the [`FloorMap`] trait.

pub mod map;
pub mod position;

pub use map::{FloorMap, GridMap};
pub use position::Position;
