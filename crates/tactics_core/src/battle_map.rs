//! The battle map: terrain grid, fighter placement and tile items.
//!
//! Fighter placement is a one-to-one table between [`FighterId`] and
//! [`Coord`]. Both directions are stored and updated together so that
//! `fighter_at` and `position_of` are O(1) and no two fighters can ever
//! share a tile. Every command validates its preconditions and returns a
//! [`MapError`] instead of overwriting state.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{MapError, Result};
use crate::fighter::{Fighter, FighterId};
use crate::items::Item;
use crate::reachability::{self, ReachableTiles};
use crate::terrain::{Terrain, TerrainCode};

/// Terrain grid plus everything standing or lying on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleMap {
    /// Grid width in tiles.
    width: u32,
    /// Grid height in tiles.
    height: u32,
    /// Terrain stored in row-major order (`y * width + x`).
    tiles: Vec<Terrain>,
    /// Distinct terrains in first-seen row-major order.
    terrains: Vec<Terrain>,
    /// Fighter -> tile.
    positions: HashMap<FighterId, Coord>,
    /// Tile -> fighter, kept in lockstep with `positions`.
    occupants: HashMap<Coord, FighterId>,
    /// Items lying on tiles.
    items: BTreeMap<Coord, Item>,
}

impl BattleMap {
    /// Create a map with every tile set to `terrain`.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero.
    #[must_use]
    pub fn filled(width: u32, height: u32, terrain: Terrain) -> Self {
        assert!(width > 0, "BattleMap width must be positive");
        assert!(height > 0, "BattleMap height must be positive");

        let cell_count = (width as usize) * (height as usize);
        Self::with_tiles(width, height, vec![terrain; cell_count])
    }

    /// Create a map from row-major terrain.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDimensions`] if a dimension is zero or
    /// `tiles.len() != width * height`.
    pub fn from_terrain(width: u32, height: u32, tiles: Vec<Terrain>) -> Result<Self> {
        check_dimensions(width, height, tiles.len())?;
        Ok(Self::with_tiles(width, height, tiles))
    }

    /// Create a map from raw row-major terrain codes, resolving each through
    /// the terrain catalog.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidDimensions`] on a size mismatch and
    /// [`MapError::UnknownTerrain`] for the first code with no catalog
    /// entry. No map is produced in either case.
    pub fn from_codes(width: u32, height: u32, codes: &[TerrainCode]) -> Result<Self> {
        check_dimensions(width, height, codes.len())?;

        let tiles = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| {
                Terrain::from_code(code).ok_or_else(|| {
                    let index = index as u32;
                    MapError::UnknownTerrain {
                        code,
                        x: index % width,
                        y: index / width,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::with_tiles(width, height, tiles))
    }

    /// Create a map from rows of terrain symbols (see [`Terrain::symbol`]).
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidScenario`] for an unknown symbol or ragged
    /// rows.
    pub fn from_symbols<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count()) as u32;
        let mut tiles = Vec::with_capacity((width as usize) * (height as usize));

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() as u32 != width {
                return Err(MapError::InvalidScenario(format!(
                    "row {y} has {} tiles, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, symbol) in row.chars().enumerate() {
                let terrain = Terrain::from_symbol(symbol).ok_or_else(|| {
                    MapError::InvalidScenario(format!(
                        "unknown terrain symbol '{symbol}' at ({x}, {y})"
                    ))
                })?;
                tiles.push(terrain);
            }
        }

        Self::from_terrain(width, height, tiles)
    }

    fn with_tiles(width: u32, height: u32, tiles: Vec<Terrain>) -> Self {
        let mut terrains = Vec::new();
        for terrain in &tiles {
            if !terrains.contains(terrain) {
                terrains.push(*terrain);
            }
        }

        Self {
            width,
            height,
            tiles,
            terrains,
            positions: HashMap::new(),
            occupants: HashMap::new(),
            items: BTreeMap::new(),
        }
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Check if a coordinate lies on the map.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        (coord.y as usize) * (self.width as usize) + (coord.x as usize)
    }

    fn checked(&self, x: i32, y: i32) -> Result<Coord> {
        let coord = Coord::new(x, y);
        if self.in_bounds(coord) {
            Ok(coord)
        } else {
            Err(MapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Terrain at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the map. Callers are expected to
    /// validate against [`width`](Self::width) and [`height`](Self::height);
    /// use [`get_terrain`](Self::get_terrain) for a checked lookup.
    #[must_use]
    pub fn terrain_at(&self, x: i32, y: i32) -> Terrain {
        let coord = Coord::new(x, y);
        assert!(
            self.in_bounds(coord),
            "terrain_at({x}, {y}) outside {}x{} map",
            self.width,
            self.height
        );
        self.tiles[self.index(coord)]
    }

    /// Terrain at `coord`, or `None` if out of bounds.
    #[must_use]
    pub fn get_terrain(&self, coord: Coord) -> Option<Terrain> {
        self.in_bounds(coord).then(|| self.tiles[self.index(coord)])
    }

    /// Terrain rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Terrain]> {
        self.tiles.chunks(self.width as usize)
    }

    /// Distinct terrains used by this map, in first-seen row-major order.
    #[must_use]
    pub fn terrains(&self) -> &[Terrain] {
        &self.terrains
    }

    /// Fighter standing on `coord`, if any.
    #[must_use]
    pub fn fighter_at(&self, coord: Coord) -> Option<FighterId> {
        self.occupants.get(&coord).copied()
    }

    /// Where a fighter stands, if placed.
    #[must_use]
    pub fn position_of(&self, fighter: FighterId) -> Option<Coord> {
        self.positions.get(&fighter).copied()
    }

    /// Check if a fighter stands on `coord`.
    #[must_use]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.occupants.contains_key(&coord)
    }

    /// Check if a fighter is on the map.
    #[must_use]
    pub fn contains_fighter(&self, fighter: FighterId) -> bool {
        self.positions.contains_key(&fighter)
    }

    /// Placed fighters and their tiles, sorted by fighter id.
    #[must_use]
    pub fn fighters(&self) -> Vec<(FighterId, Coord)> {
        let mut placed: Vec<_> = self.positions.iter().map(|(f, c)| (*f, *c)).collect();
        placed.sort_unstable_by_key(|(f, _)| *f);
        placed
    }

    /// Number of placed fighters.
    #[must_use]
    pub fn fighter_count(&self) -> usize {
        self.positions.len()
    }

    fn require_position(&self, fighter: FighterId) -> Result<Coord> {
        self.position_of(fighter)
            .ok_or(MapError::FighterNotPlaced(fighter))
    }

    /// Place a fighter that is not yet on the map onto an empty tile.
    ///
    /// # Errors
    ///
    /// - [`MapError::FighterAlreadyPlaced`] if the fighter is on the map.
    /// - [`MapError::OutOfBounds`] if `(x, y)` is off the map.
    /// - [`MapError::TileOccupied`] if another fighter stands there.
    pub fn add_fighter(&mut self, fighter: FighterId, x: i32, y: i32) -> Result<()> {
        if self.contains_fighter(fighter) {
            return Err(MapError::FighterAlreadyPlaced(fighter));
        }
        let coord = self.checked(x, y)?;
        if let Some(occupant) = self.fighter_at(coord) {
            return Err(MapError::TileOccupied { x, y, occupant });
        }

        self.positions.insert(fighter, coord);
        self.occupants.insert(coord, fighter);
        tracing::debug!(fighter = %fighter, x, y, "Placed fighter");
        Ok(())
    }

    /// Move a placed fighter to a tile not held by another fighter.
    ///
    /// Movement range is not checked here; query
    /// [`reachable_tiles`](Self::reachable_tiles) first. Returns the tile
    /// the fighter left.
    ///
    /// # Errors
    ///
    /// - [`MapError::FighterNotPlaced`] if the fighter is not on the map.
    /// - [`MapError::OutOfBounds`] if `(x, y)` is off the map.
    /// - [`MapError::TileOccupied`] if a different fighter stands there.
    pub fn move_fighter(&mut self, fighter: FighterId, x: i32, y: i32) -> Result<Coord> {
        let from = self.require_position(fighter)?;
        let to = self.checked(x, y)?;
        match self.fighter_at(to) {
            Some(occupant) if occupant != fighter => {
                return Err(MapError::TileOccupied { x, y, occupant });
            }
            _ => {}
        }

        self.occupants.remove(&from);
        self.occupants.insert(to, fighter);
        self.positions.insert(fighter, to);
        tracing::debug!(fighter = %fighter, from = %from, to = %to, "Moved fighter");
        Ok(from)
    }

    /// Take a fighter off the map (death or retreat). Returns its last tile.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::FighterNotPlaced`] if the fighter is not on the map.
    pub fn remove_fighter(&mut self, fighter: FighterId) -> Result<Coord> {
        let coord = self
            .positions
            .remove(&fighter)
            .ok_or(MapError::FighterNotPlaced(fighter))?;
        self.occupants.remove(&coord);
        tracing::debug!(fighter = %fighter, at = %coord, "Removed fighter");
        Ok(coord)
    }

    /// Whether `attacker` can hit `defender` from where they stand.
    ///
    /// True iff the Manhattan distance between them lies within the
    /// attacker's range band, inclusive on both ends.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::FighterNotPlaced`] if either fighter is off the map.
    pub fn can_hit(&self, attacker: &Fighter, defender: &Fighter) -> Result<bool> {
        let from = self.require_position(attacker.id())?;
        let to = self.require_position(defender.id())?;
        Ok(attacker.range().contains(from.manhattan_distance(to)))
    }

    /// Tiles `fighter` can move to or attack this turn.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::FighterNotPlaced`] if the fighter is off the map.
    pub fn reachable_tiles(&self, fighter: &Fighter) -> Result<ReachableTiles> {
        reachability::compute(self, fighter)
    }

    /// Leave an item on an empty item slot.
    ///
    /// # Errors
    ///
    /// - [`MapError::OutOfBounds`] if `(x, y)` is off the map.
    /// - [`MapError::ItemSlotOccupied`] if an item already lies there.
    pub fn place_item(&mut self, item: Item, x: i32, y: i32) -> Result<()> {
        let coord = self.checked(x, y)?;
        if self.items.contains_key(&coord) {
            return Err(MapError::ItemSlotOccupied { x, y });
        }
        tracing::debug!(item = item.name(), x, y, "Dropped item");
        self.items.insert(coord, item);
        Ok(())
    }

    /// Item lying on `coord`.
    #[must_use]
    pub fn item_at(&self, coord: Coord) -> Option<&Item> {
        self.items.get(&coord)
    }

    /// Pick up the item lying on `coord`.
    pub fn take_item(&mut self, coord: Coord) -> Option<Item> {
        self.items.remove(&coord)
    }

    /// Items on the map in row-major tile order.
    pub fn items(&self) -> impl Iterator<Item = (Coord, &Item)> {
        let mut items: Vec<_> = self.items.iter().map(|(c, i)| (*c, i)).collect();
        items.sort_by_key(|(c, _)| (c.y, c.x));
        items.into_iter()
    }
}

fn check_dimensions(width: u32, height: u32, cells: usize) -> Result<()> {
    if width == 0 || height == 0 || cells != (width as usize) * (height as usize) {
        return Err(MapError::InvalidDimensions {
            width,
            height,
            cells,
        });
    }
    Ok(())
}
