//! Test fixtures and helpers.
//!
//! Pre-built maps and fighters for consistent testing.

use tactics_core::battle::Battle;
use tactics_core::battle_map::BattleMap;
use tactics_core::fighter::{Fighter, FighterClass, FighterId};
use tactics_core::items::armory;
use tactics_core::terrain::Terrain;

/// An all-plain map.
#[must_use]
pub fn plain_map(width: u32, height: u32) -> BattleMap {
    BattleMap::filled(width, height, Terrain::Plain)
}

/// Build a map from terrain symbol rows.
///
/// # Panics
///
/// Panics if the rows are ragged or contain an unknown symbol.
#[must_use]
pub fn map_from_rows(rows: &[&str]) -> BattleMap {
    BattleMap::from_symbols(rows).expect("fixture rows must be a valid map")
}

/// A 7x5 skirmish field: a forest belt, a mountain pass and a river.
///
/// ```text
/// ..f....
/// .ffm.~.
/// ..=m.~.
/// ..=..~.
/// .......
/// ```
#[must_use]
pub fn skirmish_map() -> BattleMap {
    map_from_rows(&[
        "..f....", //
        ".ffm.~.",
        "..=m.~.",
        "..=..~.",
        ".......",
    ])
}

/// An unarmed fighter with a fixed movement allowance.
#[must_use]
pub fn fighter(id: u32, class: FighterClass, movement: u32) -> Fighter {
    Fighter::new(FighterId(id), format!("{}-{id}", class.name()), class).with_movement(movement)
}

/// A sword-wielding mercenary (melee, range 1).
#[must_use]
pub fn swordsman(id: u32, movement: u32) -> Fighter {
    fighter(id, FighterClass::Mercenary, movement)
        .with_weapon(armory::iron_sword())
        .expect("mercenaries wield swords")
}

/// A bow-wielding archer (range exactly 2).
#[must_use]
pub fn archer(id: u32, movement: u32) -> Fighter {
    fighter(id, FighterClass::Archer, movement)
        .with_weapon(armory::iron_bow())
        .expect("archers wield bows")
}

/// A javelin-throwing soldier (range 1 to 2).
#[must_use]
pub fn javelineer(id: u32, movement: u32) -> Fighter {
    fighter(id, FighterClass::Soldier, movement)
        .with_weapon(armory::javelin())
        .expect("soldiers wield lances")
}

/// A battle on `map` with one armed mercenary deployed on `(x, y)`.
///
/// # Panics
///
/// Panics if the tile is off the map.
#[must_use]
pub fn battle_with_swordsman(map: BattleMap, x: i32, y: i32, movement: u32) -> (Battle, FighterId) {
    let mut battle = Battle::new(map);
    let id = battle
        .deploy_with(|id| swordsman(id.0, movement), x, y)
        .expect("fixture deployment must fit the map");
    (battle, id)
}
