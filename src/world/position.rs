//! Grid coordinates

use serde::{Deserialize, Serialize};

/// A tile coordinate. Signed so off-map deltas stay representable; the
/// map decides what is in bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// Distance where diagonal steps count as one, matching 8-way
    /// movement and adjacency.
    pub fn chebyshev_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Bresenham line from `self` to `dest`, inclusive of both ends.
    pub fn line_to(&self, dest: Position) -> Vec<Position> {
        let mut points = Vec::new();
        let dx = (dest.x - self.x).abs();
        let dy = -(dest.y - self.y).abs();
        let sx = if self.x < dest.x { 1 } else { -1 };
        let sy = if self.y < dest.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut current = *self;

        loop {
            points.push(current);
            if current == dest {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                current.x += sx;
            }
            if doubled <= dx {
                err += dx;
                current.y += sy;
            }
        }
        points
    }
}
