//! # Tactics Core
//!
//! Turn-based tactical grid engine.
//!
//! This crate contains **only** game-state logic:
//! - No rendering
//! - No IO
//! - No system randomness
//!
//! This separation enables:
//! - Headless tools and scenario validation
//! - Any presentation layer on top (terminal, GUI, mobile)
//! - Deterministic testing of movement and targeting
//!
//! ## Crate Structure
//!
//! - [`terrain`] - Terrain catalog: raw codes, movement costs, tile bonuses
//! - [`coord`] - Tile coordinates and Manhattan distance
//! - [`fighter`] - Fighter stats, classes and the roster
//! - [`items`] - Weapons, consumables and the armory
//! - [`battle_map`] - Terrain grid, placement and attack range checks
//! - [`reachability`] - Movement flood and attack range projection
//! - [`battle`] - Map plus roster, with movement spending
//! - [`scenario`] / [`data`] - Building battles from RON scenario data

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod battle;
pub mod battle_map;
pub mod coord;
pub mod data;
pub mod error;
pub mod fighter;
pub mod items;
pub mod reachability;
pub mod scenario;
pub mod terrain;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::battle::Battle;
    pub use crate::battle_map::BattleMap;
    pub use crate::coord::Coord;
    pub use crate::data::{Deployment, ItemDrop, ScenarioData};
    pub use crate::error::{MapError, Result};
    pub use crate::fighter::{Fighter, FighterClass, FighterId, Roster, Stats};
    pub use crate::items::{
        armory, Consumable, Item, RangeBand, Weapon, WeaponCategory, WeaponRanks,
    };
    pub use crate::reachability::{Reach, ReachableTiles};
    pub use crate::scenario::load_terrain;
    pub use crate::terrain::{Terrain, TerrainCode};
}
