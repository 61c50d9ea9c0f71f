//! Proptest strategies for maps, coordinates and attack ranges.

use proptest::prelude::*;
use tactics_core::battle_map::BattleMap;
use tactics_core::coord::Coord;
use tactics_core::items::RangeBand;
use tactics_core::terrain::Terrain;

/// Any catalog terrain.
pub fn arb_terrain() -> impl Strategy<Value = Terrain> {
    proptest::sample::select(Terrain::ALL.to_vec())
}

/// Terrain weighted towards passable tiles so that floods cover some ground.
pub fn arb_open_terrain() -> impl Strategy<Value = Terrain> {
    prop_oneof![
        6 => Just(Terrain::Plain),
        2 => Just(Terrain::Forest),
        1 => Just(Terrain::Mountain),
        1 => Just(Terrain::Sea),
    ]
}

/// A map of `width` x `height` with random terrain.
pub fn arb_map_of(width: u32, height: u32) -> impl Strategy<Value = BattleMap> {
    let cells = (width as usize) * (height as usize);
    proptest::collection::vec(arb_open_terrain(), cells).prop_map(move |tiles| {
        BattleMap::from_terrain(width, height, tiles).expect("tile count matches dimensions")
    })
}

/// A map between 1x1 and `max` x `max`.
pub fn arb_map(max: u32) -> impl Strategy<Value = BattleMap> {
    (1..=max, 1..=max).prop_flat_map(|(w, h)| arb_map_of(w, h))
}

/// A map paired with an in-bounds coordinate on it.
pub fn arb_map_and_coord(max: u32) -> impl Strategy<Value = (BattleMap, Coord)> {
    arb_map(max).prop_flat_map(|map| {
        let (w, h) = (map.width() as i32, map.height() as i32);
        (Just(map), (0..w, 0..h).prop_map(|(x, y)| Coord::new(x, y)))
    })
}

/// Any coordinate, in bounds or not, near a `max` x `max` map.
pub fn arb_coord(max: u32) -> impl Strategy<Value = Coord> {
    let max = max as i32;
    (-3..max + 3, -3..max + 3).prop_map(|(x, y)| Coord::new(x, y))
}

/// An attack range band with `1 <= min <= max <= 4`.
pub fn arb_range_band() -> impl Strategy<Value = RangeBand> {
    (1u32..=4)
        .prop_flat_map(|min| (Just(min), min..=4))
        .prop_map(|(min, max)| RangeBand::new(min, max))
}
