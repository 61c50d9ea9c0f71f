//! Terminal rendering of battle maps and reachable tiles.
//!
//! Terrain is drawn with [`Terrain::symbol`]. Fighters are drawn with the
//! first letter of their name, items with `*`.

use std::fmt::Write as _;

use tactics_core::battle::Battle;
use tactics_core::coord::Coord;
use tactics_core::reachability::{Reach, ReachableTiles};
use tactics_core::terrain::Terrain;

/// Rendering options.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Use colored output (ANSI).
    pub use_color: bool,
    /// Append a terrain legend below the map.
    pub show_legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            show_legend: true,
        }
    }
}

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";

    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Symbol for the fighter's own tile in a reach view.
pub const ORIGIN_SYMBOL: char = '@';
/// Symbol for a reachable tile.
pub const REACHABLE_SYMBOL: char = '+';
/// Symbol for an assailable tile.
pub const ASSAILABLE_SYMBOL: char = 'x';
/// Symbol for a tile holding an item.
pub const ITEM_SYMBOL: char = '*';

fn terrain_color(terrain: Terrain) -> &'static str {
    match terrain.movement_cost() {
        None => colors::GRAY,
        Some(1) => "",
        Some(_) => colors::GREEN,
    }
}

fn fighter_symbol(name: &str) -> char {
    name.chars().next().map_or('?', |c| c.to_ascii_uppercase())
}

fn push_cell(output: &mut String, symbol: char, color: &str, config: &RenderConfig) {
    if config.use_color && !color.is_empty() {
        let _ = write!(output, "{color}{symbol}{}", colors::RESET);
    } else {
        output.push(symbol);
    }
}

fn push_legend(output: &mut String, battle: &Battle) {
    output.push('\n');
    for terrain in battle.map().terrains() {
        let cost = terrain
            .movement_cost()
            .map_or_else(|| "impassable".to_string(), |c| format!("cost {c}"));
        let _ = writeln!(output, "  {} {} ({cost})", terrain.symbol(), terrain.name());
    }
    for (id, coord) in battle.map().fighters() {
        if let Some(fighter) = battle.roster().get(id) {
            let _ = writeln!(
                output,
                "  {} {} {} at {coord}, mov {}, range {}",
                fighter_symbol(fighter.name()),
                fighter.name(),
                fighter.class().name(),
                fighter.movement(),
                fighter.range()
            );
        }
    }
}

/// Render terrain, items and fighters.
#[must_use]
pub fn render_battle(battle: &Battle, config: &RenderConfig) -> String {
    let map = battle.map();
    let mut output = String::new();

    for (y, row) in map.rows().enumerate() {
        for (x, &terrain) in row.iter().enumerate() {
            let coord = Coord::new(x as i32, y as i32);
            if let Some(fighter) = battle.fighter_at(coord) {
                push_cell(&mut output, fighter_symbol(fighter.name()), colors::BOLD, config);
            } else if map.item_at(coord).is_some() {
                push_cell(&mut output, ITEM_SYMBOL, colors::CYAN, config);
            } else {
                push_cell(&mut output, terrain.symbol(), terrain_color(terrain), config);
            }
        }
        output.push('\n');
    }

    if config.show_legend {
        push_legend(&mut output, battle);
    }
    output
}

/// Render one fighter's reachable and assailable tiles over the terrain.
///
/// Other fighters stay visible; tiles outside both sets show their terrain.
#[must_use]
pub fn render_reach(battle: &Battle, tiles: &ReachableTiles, config: &RenderConfig) -> String {
    let map = battle.map();
    let mut output = String::new();

    for (y, row) in map.rows().enumerate() {
        for (x, &terrain) in row.iter().enumerate() {
            let coord = Coord::new(x as i32, y as i32);
            let (symbol, color) = if coord == tiles.origin() {
                (ORIGIN_SYMBOL, colors::BOLD)
            } else if let Some(fighter) = battle.fighter_at(coord) {
                let color = if tiles.is_assailable(coord) {
                    colors::RED
                } else {
                    colors::BOLD
                };
                (fighter_symbol(fighter.name()), color)
            } else {
                match tiles.get(coord) {
                    Reach::Reachable => (REACHABLE_SYMBOL, colors::BLUE),
                    Reach::Assailable => (ASSAILABLE_SYMBOL, colors::RED),
                    Reach::Unreachable => (terrain.symbol(), terrain_color(terrain)),
                }
            };
            push_cell(&mut output, symbol, color, config);
        }
        output.push('\n');
    }

    if config.show_legend {
        let _ = write!(
            output,
            "\n  {ORIGIN_SYMBOL} origin, {REACHABLE_SYMBOL} reachable ({}), \
             {ASSAILABLE_SYMBOL} assailable ({})\n",
            tiles.reachable_coords().count(),
            tiles.assailable_coords().count()
        );
    }
    output
}
