//! Integer grid coordinates.
//!
//! Coordinates are small `Copy` values. The battle map hands out copies and
//! only its move command changes where a fighter stands, so no coordinate is
//! ever aliased between the map and a caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tile position on the battle map (`x` = column, `y` = row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Orthogonal neighbour offsets (no diagonal movement).
pub const ORTHOGONAL: [(i32, i32); 4] = [
    (1, 0),  // East
    (0, 1),  // South
    (-1, 0), // West
    (0, -1), // North
];

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin tile.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Manhattan distance `|x1-x2| + |y1-y2|`.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Coordinate shifted by an offset.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four orthogonal neighbours, in East, South, West, North order.
    ///
    /// Neighbours may lie outside any particular map.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        ORTHOGONAL.into_iter().map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
