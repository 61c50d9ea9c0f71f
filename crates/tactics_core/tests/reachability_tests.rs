//! End-to-end movement and targeting scenarios on small maps.

use tactics_core::prelude::*;
use tactics_test_utils::fixtures::{
    archer, battle_with_swordsman, fighter, javelineer, map_from_rows, plain_map, skirmish_map,
    swordsman,
};

#[test]
fn test_open_field_diamond() {
    let mut map = plain_map(5, 5);
    let mover = swordsman(1, 2);
    map.add_fighter(mover.id(), 2, 2).unwrap();

    let tiles = map.reachable_tiles(&mover).unwrap();
    let origin = Coord::new(2, 2);

    let reachable: Vec<Coord> = tiles.reachable_coords().collect();
    assert_eq!(reachable.len(), 13);
    assert!(reachable.iter().all(|c| c.manhattan_distance(origin) <= 2));

    let assailable: Vec<Coord> = tiles.assailable_coords().collect();
    assert_eq!(assailable.len(), 8);
    assert!(assailable.iter().all(|c| c.manhattan_distance(origin) == 3));

    for corner in [(0, 0), (4, 0), (0, 4), (4, 4)] {
        assert_eq!(tiles.get(corner.into()), Reach::Unreachable);
    }
}

#[test]
fn test_two_fighters_cannot_share_a_tile() {
    let mut map = plain_map(5, 5);
    map.add_fighter(FighterId(1), 1, 1).unwrap();

    let err = map.add_fighter(FighterId(2), 1, 1).unwrap_err();
    assert!(matches!(
        err,
        MapError::TileOccupied {
            occupant: FighterId(1),
            ..
        }
    ));
    assert_eq!(map.fighter_at(Coord::new(1, 1)), Some(FighterId(1)));
    assert_eq!(map.position_of(FighterId(2)), None);

    map.add_fighter(FighterId(2), 2, 1).unwrap();
    assert!(map.move_fighter(FighterId(2), 1, 1).is_err());
    assert_eq!(map.position_of(FighterId(2)), Some(Coord::new(2, 1)));
}

#[test]
fn test_impassable_neighbour_forces_detour() {
    let mut map = map_from_rows(&[
        ".~...", //
        ".....",
    ]);
    let short = fighter(1, FighterClass::Mercenary, 2);
    map.add_fighter(short.id(), 0, 0).unwrap();

    let tiles = map.reachable_tiles(&short).unwrap();
    assert!(!tiles.is_reachable(Coord::new(1, 0)));
    assert!(!tiles.is_reachable(Coord::new(2, 0)));
    assert!(tiles.is_reachable(Coord::new(1, 1)));

    map.remove_fighter(short.id()).unwrap();
    let long = fighter(2, FighterClass::Mercenary, 4);
    map.add_fighter(long.id(), 0, 0).unwrap();

    let tiles = map.reachable_tiles(&long).unwrap();
    assert!(!tiles.is_reachable(Coord::new(1, 0)));
    assert_eq!(tiles.remaining_movement(Coord::new(2, 0)), Some(0));
}

#[test]
fn test_unknown_code_produces_no_map() {
    let mut codes = vec![Terrain::Plain.code(); 9];
    codes[7] = TerrainCode(0xFFAB_CDEF);

    let err = load_terrain(3, 3, &codes).unwrap_err();
    assert!(matches!(
        err,
        MapError::UnknownTerrain {
            code: TerrainCode(0xFFAB_CDEF),
            x: 1,
            y: 2,
        }
    ));
}

#[test]
fn test_archer_cannot_hit_adjacent() {
    let mut map = plain_map(4, 1);
    let bow = archer(1, 5);
    let target = swordsman(2, 5);
    map.add_fighter(bow.id(), 0, 0).unwrap();
    map.add_fighter(target.id(), 1, 0).unwrap();

    assert!(!map.can_hit(&bow, &target).unwrap());
    assert!(map.can_hit(&target, &bow).unwrap());

    map.move_fighter(target.id(), 2, 0).unwrap();
    assert!(map.can_hit(&bow, &target).unwrap());
    assert!(!map.can_hit(&target, &bow).unwrap());

    map.move_fighter(target.id(), 3, 0).unwrap();
    assert!(!map.can_hit(&bow, &target).unwrap());
}

#[test]
fn test_javelin_covers_one_and_two() {
    let mut map = plain_map(4, 1);
    let thrower = javelineer(1, 5);
    let target = swordsman(2, 5);
    map.add_fighter(thrower.id(), 0, 0).unwrap();

    for (x, expected) in [(1, true), (2, true), (3, false)] {
        map.add_fighter(target.id(), x, 0).unwrap();
        assert_eq!(map.can_hit(&thrower, &target).unwrap(), expected, "x = {x}");
        map.remove_fighter(target.id()).unwrap();
    }
}

#[test]
fn test_can_hit_requires_placement() {
    let mut map = plain_map(3, 3);
    let a = swordsman(1, 5);
    let b = swordsman(2, 5);
    map.add_fighter(a.id(), 0, 0).unwrap();

    assert!(matches!(
        map.can_hit(&a, &b),
        Err(MapError::FighterNotPlaced(FighterId(2)))
    ));
}

#[test]
fn test_skirmish_map_costs() {
    let mut map = skirmish_map();
    let mover = fighter(1, FighterClass::Mercenary, 3);
    map.add_fighter(mover.id(), 0, 1).unwrap();

    let tiles = map.reachable_tiles(&mover).unwrap();
    // Forest costs 2: (1,1) leaves 1, (2,1) needs 2 more.
    assert_eq!(tiles.remaining_movement(Coord::new(1, 1)), Some(1));
    assert!(!tiles.is_reachable(Coord::new(2, 1)));
    // Plain then road: 1 + 1 + 1.
    assert_eq!(tiles.remaining_movement(Coord::new(2, 2)), Some(0));
    assert!(tiles.is_assailable(Coord::new(3, 2)));
}

#[test]
fn test_battle_move_then_requery() {
    let (mut battle, id) = battle_with_swordsman(plain_map(6, 6), 0, 0, 4);

    battle.move_fighter(id, 2, 1).unwrap();
    let tiles = battle.reachable_tiles(id).unwrap();
    assert_eq!(tiles.origin(), Coord::new(2, 1));
    assert_eq!(tiles.reachable_coords().count(), 5);
    assert!(battle.move_fighter(id, 5, 5).is_err());

    battle.end_turn();
    let tiles = battle.reachable_tiles(id).unwrap();
    assert!(tiles.is_reachable(Coord::new(5, 2)));
}
