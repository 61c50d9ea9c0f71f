//! Error types for the tactical grid engine.

use thiserror::Error;

use crate::fighter::FighterId;
use crate::terrain::TerrainCode;

/// Result type alias using [`MapError`].
pub type Result<T> = std::result::Result<T, MapError>;

/// Top-level error type for map loading and map commands.
///
/// Load-time variants abort map construction. Every other variant is a
/// broken caller contract: the engine reports it instead of auto-correcting.
#[derive(Debug, Error)]
pub enum MapError {
    /// A raw terrain code has no catalog entry.
    #[error("Unknown terrain code {code} at ({x}, {y})")]
    UnknownTerrain {
        /// The unmapped code.
        code: TerrainCode,
        /// Column of the offending tile.
        x: u32,
        /// Row of the offending tile.
        y: u32,
    },

    /// Scenario resource could not be found.
    #[error("Scenario resource not found: {0}")]
    ResourceNotFound(String),

    /// Terrain code buffer does not match the requested dimensions.
    #[error("Invalid map dimensions {width}x{height} for {cells} terrain cells")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Number of codes supplied.
        cells: usize,
    },

    /// Coordinate lies outside the map.
    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Map width.
        width: u32,
        /// Map height.
        height: u32,
    },

    /// Fighter is already on the map.
    #[error("Fighter {0} is already placed")]
    FighterAlreadyPlaced(FighterId),

    /// Fighter is not on the map.
    #[error("Fighter {0} is not placed on the map")]
    FighterNotPlaced(FighterId),

    /// Destination tile holds another fighter.
    #[error("Tile ({x}, {y}) is occupied by fighter {occupant}")]
    TileOccupied {
        /// Column of the occupied tile.
        x: i32,
        /// Row of the occupied tile.
        y: i32,
        /// Fighter standing there.
        occupant: FighterId,
    },

    /// Destination is not reachable with the fighter's remaining movement.
    #[error("Fighter {fighter} cannot reach ({x}, {y}) this turn")]
    OutOfReach {
        /// Fighter attempting to move.
        fighter: FighterId,
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
    },

    /// Fighter id is not enlisted in the roster.
    #[error("Unknown fighter: {0}")]
    UnknownFighter(FighterId),

    /// Tile already holds an item.
    #[error("Tile ({x}, {y}) already holds an item")]
    ItemSlotOccupied {
        /// Column of the tile.
        x: i32,
        /// Row of the tile.
        y: i32,
    },

    /// Fighter lacks the weapon rank for an item.
    #[error("Fighter {fighter} cannot equip '{item}'")]
    CannotEquip {
        /// Fighter attempting to equip.
        fighter: FighterId,
        /// Item name.
        item: String,
    },

    /// Scenario data is malformed.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// Scenario RON text failed to parse.
    #[error("Failed to parse scenario: {0}")]
    ScenarioParse(#[from] ron::error::SpannedError),
}
