//! The scenarios shipped under `data/scenarios` must load and render.

use std::path::PathBuf;

use tactics_core::prelude::{Battle, Coord, FighterId, Terrain};
use tactics_test_utils::fixtures::{skirmish_map, swordsman};
use tactics_tools::loader;
use tactics_tools::render::{render_battle, render_reach, RenderConfig};

fn scenario_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/scenarios")
}

const NO_COLOR: RenderConfig = RenderConfig {
    use_color: false,
    show_legend: false,
};

#[test]
fn test_every_bundled_chapter_builds() {
    let root = scenario_root();
    let chapters = loader::list_chapters(&root, "border").unwrap();
    assert!(!chapters.is_empty());

    for chapter in chapters {
        let battle = loader::load_battle(&root, "border", chapter)
            .unwrap_or_else(|e| panic!("border chapter {chapter}: {e}"));
        assert!(battle.map().fighter_count() > 0);
    }
}

#[test]
fn test_border_opening_positions() {
    let battle = loader::load_battle(&scenario_root(), "border", 1).unwrap();
    let map = battle.map();

    assert_eq!((map.width(), map.height()), (10, 8));
    assert_eq!(map.terrain_at(2, 6), Terrain::ClosedDoor);
    assert_eq!(battle.fighter_at(Coord::new(1, 1)).map(|f| f.name()), Some("Lyn"));

    let wil = battle.roster().find_by_name("Wil").unwrap().id();
    let lyn = battle.roster().find_by_name("Lyn").unwrap().id();
    assert!(battle.can_hit(wil, lyn).unwrap());
    assert!(!battle.can_hit(lyn, wil).unwrap());

    let tiles = battle.reachable_tiles(lyn).unwrap();
    assert!(tiles.is_reachable(Coord::new(1, 1)));
    assert!(!tiles.is_reachable(Coord::new(9, 0)));
}

#[test]
fn test_render_skirmish_fixture() {
    let mut battle = Battle::new(skirmish_map());
    let id = battle
        .deploy_with(|id| swordsman(id.0, 2), 0, 0)
        .unwrap();
    assert_eq!(id, FighterId(1));

    let map_view = render_battle(&battle, &NO_COLOR);
    assert_eq!(map_view.lines().next(), Some("M.f...."));

    let tiles = battle.reachable_tiles(id).unwrap();
    let reach_view = render_reach(&battle, &tiles, &NO_COLOR);
    assert_eq!(reach_view.lines().next(), Some("@+x...."));
}
