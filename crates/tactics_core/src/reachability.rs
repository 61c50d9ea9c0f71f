//! Movement and attack reachability.
//!
//! Reachability is a cost-bounded Dijkstra expansion from the fighter's
//! tile over the four orthogonal neighbours. Each tile records the most
//! movement points that can be left on arrival; a neighbour is relaxed only
//! when the new remainder is non-negative and strictly larger than the one
//! already recorded. Tiles held by other fighters and impassable terrain are
//! never entered.
//!
//! Once movement expansion is done, every tile within the fighter's attack
//! band of a reachable tile that is not itself reachable is marked
//! assailable. Range projection ignores occupants and terrain: only the
//! Manhattan distance matters.
//!
//! The result is a snapshot. It is not updated when the map or the fighter
//! changes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::battle_map::BattleMap;
use crate::coord::Coord;
use crate::error::{MapError, Result};
use crate::fighter::{Fighter, FighterId};
use crate::items::RangeBand;

/// Per-tile reachability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Reach {
    /// Neither reachable nor attackable this turn.
    #[default]
    Unreachable,
    /// The fighter can end its move here.
    Reachable,
    /// Not reachable, but within attack range of a reachable tile.
    Assailable,
}

/// Classification grid for one fighter, same dimensions as the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachableTiles {
    width: u32,
    height: u32,
    origin: Coord,
    /// Classification in row-major order.
    cells: Vec<Reach>,
    /// Most movement points left on arrival, for reachable tiles.
    remaining: Vec<Option<u32>>,
}

impl ReachableTiles {
    /// Grid width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Tile the expansion started from.
    #[must_use]
    pub const fn origin(&self) -> Coord {
        self.origin
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        let in_bounds = coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height;
        in_bounds.then(|| (coord.y as usize) * (self.width as usize) + (coord.x as usize))
    }

    fn coord_of(&self, index: usize) -> Coord {
        let width = self.width as usize;
        Coord::new((index % width) as i32, (index / width) as i32)
    }

    /// Classification of `coord`. Out-of-bounds tiles are unreachable.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Reach {
        self.index(coord).map_or(Reach::Unreachable, |i| self.cells[i])
    }

    /// True iff the fighter can end its move on `coord`.
    #[must_use]
    pub fn is_reachable(&self, coord: Coord) -> bool {
        self.get(coord) == Reach::Reachable
    }

    /// True iff `coord` is only within attack range.
    #[must_use]
    pub fn is_assailable(&self, coord: Coord) -> bool {
        self.get(coord) == Reach::Assailable
    }

    /// Movement points left after moving to `coord`, if reachable.
    #[must_use]
    pub fn remaining_movement(&self, coord: Coord) -> Option<u32> {
        self.index(coord).and_then(|i| self.remaining[i])
    }

    /// Reachable tiles in row-major order.
    pub fn reachable_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords_with(Reach::Reachable)
    }

    /// Assailable tiles in row-major order.
    pub fn assailable_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords_with(Reach::Assailable)
    }

    fn coords_with(&self, reach: Reach) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, r)| **r == reach)
            .map(|(i, _)| self.coord_of(i))
    }

    /// Classification rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Reach]> {
        self.cells.chunks(self.width as usize)
    }
}

/// A frontier entry in the expansion queue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct Frontier {
    index: usize,
    remaining: u32,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on remaining movement: the cheapest-to-reach tile pops first.
        match self.remaining.cmp(&other.remaining) {
            // Deterministic tie-breaking: lower row-major index first.
            Ordering::Equal => other.index.cmp(&self.index),
            ord => ord,
        }
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute reachability for a placed fighter from its current tile, using
/// its remaining movement and its current range band.
///
/// # Errors
///
/// Returns [`MapError::FighterNotPlaced`] if the fighter is not on the map.
pub fn compute(map: &BattleMap, fighter: &Fighter) -> Result<ReachableTiles> {
    let origin = map
        .position_of(fighter.id())
        .ok_or(MapError::FighterNotPlaced(fighter.id()))?;

    let tiles = compute_from(map, fighter.id(), origin, fighter.movement(), fighter.range());
    tracing::debug!(
        fighter = %fighter.id(),
        origin = %origin,
        movement = fighter.movement(),
        reachable = tiles.reachable_coords().count(),
        assailable = tiles.assailable_coords().count(),
        "Computed reachable tiles"
    );
    Ok(tiles)
}

/// Compute reachability for `mover` as if it stood on `origin`.
///
/// Tiles held by any fighter other than `mover` block movement. The origin
/// is always reachable, whatever its terrain.
///
/// # Panics
///
/// Panics if `origin` is outside the map.
#[must_use]
pub fn compute_from(
    map: &BattleMap,
    mover: FighterId,
    origin: Coord,
    movement: u32,
    range: RangeBand,
) -> ReachableTiles {
    assert!(map.in_bounds(origin), "reachability origin {origin} is off the map");

    let cell_count = (map.width() as usize) * (map.height() as usize);
    let mut tiles = ReachableTiles {
        width: map.width(),
        height: map.height(),
        origin,
        cells: vec![Reach::Unreachable; cell_count],
        remaining: vec![None; cell_count],
    };

    expand_movement(map, mover, &mut tiles, movement);
    project_range(&mut tiles, range);
    tiles
}

fn expand_movement(map: &BattleMap, mover: FighterId, tiles: &mut ReachableTiles, movement: u32) {
    let Some(start) = tiles.index(tiles.origin) else {
        return;
    };

    let mut frontier = BinaryHeap::new();
    tiles.remaining[start] = Some(movement);
    frontier.push(Frontier {
        index: start,
        remaining: movement,
    });

    while let Some(current) = frontier.pop() {
        // Skip stale entries superseded by a better arrival.
        if tiles.remaining[current.index].is_some_and(|best| best > current.remaining) {
            continue;
        }

        let coord = tiles.coord_of(current.index);
        for neighbor in coord.neighbors() {
            let Some(cost) = map.get_terrain(neighbor).and_then(|t| t.movement_cost()) else {
                continue;
            };
            if map.fighter_at(neighbor).is_some_and(|other| other != mover) {
                continue;
            }
            let Some(left) = current.remaining.checked_sub(cost) else {
                continue;
            };
            let Some(index) = tiles.index(neighbor) else {
                continue;
            };

            if tiles.remaining[index].map_or(true, |best| left > best) {
                tiles.remaining[index] = Some(left);
                frontier.push(Frontier {
                    index,
                    remaining: left,
                });
            }
        }
    }

    for (cell, remaining) in tiles.cells.iter_mut().zip(&tiles.remaining) {
        if remaining.is_some() {
            *cell = Reach::Reachable;
        }
    }
}

fn project_range(tiles: &mut ReachableTiles, range: RangeBand) {
    let reachable: Vec<Coord> = tiles.reachable_coords().collect();
    // No tile on the map lies further than width + height from another.
    let furthest = tiles.width.saturating_add(tiles.height);
    let reach = i32::try_from(range.max.min(furthest)).unwrap_or(i32::MAX);

    for from in reachable {
        for dy in -reach..=reach {
            let span = reach - dy.abs();
            for dx in -span..=span {
                let target = from.offset(dx, dy);
                if !range.contains(from.manhattan_distance(target)) {
                    continue;
                }
                if let Some(index) = tiles.index(target) {
                    if tiles.cells[index] == Reach::Unreachable {
                        tiles.cells[index] = Reach::Assailable;
                    }
                }
            }
        }
    }
}
