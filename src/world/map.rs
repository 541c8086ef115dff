//! Floor map collaborator
//!
//! Dungeon generation and tile storage live outside the core. The action
//! layer only needs bounds, walkability, stair locations and a way to ask
//! for a floor change.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// The tile surface of the current floor, as the core sees it.
///
/// Actor and item lookups by coordinate are *not* part of this trait: the
/// core owns its entities and resolves those against its own storage.
pub trait FloorMap {
    fn in_bounds(&self, pos: Position) -> bool;

    fn is_walkable(&self, pos: Position) -> bool;

    /// Location of the stairs leading up, if this floor has any.
    fn upstairs(&self) -> Option<Position>;

    /// Location of the stairs leading down, if this floor has any.
    fn downstairs(&self) -> Option<Position>;

    /// Request a floor transition (+1 descends, -1 ascends).
    fn move_floor(&mut self, delta: i32);
}

/// A plain walkability grid. Enough map for tests and simple embedders;
/// a real dungeon generator supplies its own [`FloorMap`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridMap {
    width: i32,
    height: i32,
    walkable: Vec<bool>,
    pub upstairs: Option<Position>,
    pub downstairs: Option<Position>,
    /// Current depth, 1-based. `move_floor` only records the request.
    pub floor: i32,
}

impl GridMap {
    /// A fully walkable `width` x `height` floor.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walkable: vec![true; (width * height) as usize],
            upstairs: None,
            downstairs: None,
            floor: 1,
        }
    }

    pub fn set_walkable(&mut self, pos: Position, walkable: bool) {
        if self.in_bounds(pos) {
            self.walkable[(pos.y * self.width + pos.x) as usize] = walkable;
        }
    }
}

impl FloorMap for GridMap {
    fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn is_walkable(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.walkable[(pos.y * self.width + pos.x) as usize]
    }

    fn upstairs(&self) -> Option<Position> {
        self.upstairs
    }

    fn downstairs(&self) -> Option<Position> {
        self.downstairs
    }

    fn move_floor(&mut self, delta: i32) {
        self.floor += delta;
        log::debug!("Floor transition requested, now on floor {}", self.floor);
    }
}
