//! Scenario chapter data for data-driven battles.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::fighter::{Fighter, FighterClass, FighterId};
use crate::items::armory;
use crate::terrain::{Terrain, TerrainCode};

/// A fighter to enlist and place when the chapter starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Display name, unique within the chapter.
    pub name: String,
    /// Class the fighter is built from.
    pub class: FighterClass,
    /// Starting column.
    pub x: i32,
    /// Starting row.
    pub y: i32,
    /// Armory weapon to equip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,
    /// Movement override for the class default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<u32>,
}

/// An armory item lying on a tile when the chapter starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDrop {
    /// Armory item name.
    pub item: String,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// One chapter of a scenario.
///
/// The legend plays the part of an indexed-colour palette: every layout
/// character maps to the raw terrain code its tiles carry.
///
/// # Example RON
///
/// ```ron
/// ScenarioData(
///     name: "tutorial",
///     chapter: 1,
///     legend: {
///         '.': 0xFFBDFE98, // plain
///         'f': 0xFF319D20, // forest
///     },
///     layout: [
///         "..f",
///         ".ff",
///     ],
///     deployments: [
///         Deployment(name: "Lyn", class: Mercenary, x: 0, y: 0, weapon: Some("Iron Sword")),
///     ],
///     items: [
///         ItemDrop(item: "Vulnerary", x: 2, y: 1),
///     ],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioData {
    /// Scenario identifier.
    pub name: String,
    /// Chapter number within the scenario.
    pub chapter: u32,
    /// Layout character -> raw terrain code.
    pub legend: BTreeMap<char, TerrainCode>,
    /// Terrain rows, top to bottom, one character per tile.
    pub layout: Vec<String>,
    /// Fighters placed at the start.
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    /// Items lying on the map at the start.
    #[serde(default)]
    pub items: Vec<ItemDrop>,
}

impl ScenarioData {
    /// Parse a chapter from RON text.
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Layout width and height in tiles (width of the first row).
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        let width = self.layout.first().map_or(0, |row| row.chars().count());
        (width as u32, self.layout.len() as u32)
    }

    /// Decode the layout into row-major raw terrain codes.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidScenario`] for an empty layout, ragged
    /// rows, or a character missing from the legend. Codes are not checked
    /// against the terrain catalog here.
    pub fn terrain_codes(&self) -> Result<Vec<TerrainCode>> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return Err(MapError::InvalidScenario(format!(
                "{} chapter {} has an empty layout",
                self.name, self.chapter
            )));
        }

        let mut codes = Vec::with_capacity((width as usize) * (height as usize));
        for (y, row) in self.layout.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MapError::InvalidScenario(format!(
                    "layout row {y} has {} tiles, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, symbol) in row.chars().enumerate() {
                let code = self.legend.get(&symbol).ok_or_else(|| {
                    MapError::InvalidScenario(format!(
                        "layout character '{symbol}' at ({x}, {y}) is not in the legend"
                    ))
                })?;
                codes.push(*code);
            }
        }
        Ok(codes)
    }

    /// Check cross-references without building the battle.
    ///
    /// Returns a list of problems (empty when the data is consistent).
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        match self.terrain_codes() {
            Ok(_) => {
                for (symbol, code) in &self.legend {
                    let used = self.layout.iter().any(|row| row.contains(*symbol));
                    if used && Terrain::from_code(*code).is_none() {
                        errors.push(format!(
                            "Legend character '{symbol}' maps to unknown terrain code {code}"
                        ));
                    }
                }
            }
            Err(e) => errors.push(e.to_string()),
        }

        let (width, height) = self.dimensions();
        let in_bounds =
            |x: i32, y: i32| x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height;

        let mut names = HashSet::new();
        let mut tiles = HashSet::new();
        for deployment in &self.deployments {
            if !names.insert(deployment.name.as_str()) {
                errors.push(format!("Duplicate deployment name '{}'", deployment.name));
            }
            if !in_bounds(deployment.x, deployment.y) {
                errors.push(format!(
                    "Deployment '{}' at ({}, {}) is off the map",
                    deployment.name, deployment.x, deployment.y
                ));
            }
            if !tiles.insert((deployment.x, deployment.y)) {
                errors.push(format!(
                    "Deployment '{}' shares tile ({}, {}) with another fighter",
                    deployment.name, deployment.x, deployment.y
                ));
            }
            if let Some(weapon_name) = &deployment.weapon {
                match armory::weapon_by_name(weapon_name) {
                    Some(weapon) => {
                        let candidate = Fighter::new(FighterId(0), &deployment.name, deployment.class);
                        if !weapon.can_equip(&candidate) {
                            errors.push(format!(
                                "Deployment '{}' ({}) cannot equip '{}'",
                                deployment.name,
                                deployment.class.name(),
                                weapon_name
                            ));
                        }
                    }
                    None => errors.push(format!(
                        "Deployment '{}' uses unknown weapon '{}'",
                        deployment.name, weapon_name
                    )),
                }
            }
        }

        let mut item_tiles = HashSet::new();
        for drop in &self.items {
            if armory::by_name(&drop.item).is_none() {
                errors.push(format!("Unknown item '{}'", drop.item));
            }
            if !in_bounds(drop.x, drop.y) {
                errors.push(format!(
                    "Item '{}' at ({}, {}) is off the map",
                    drop.item, drop.x, drop.y
                ));
            }
            if !item_tiles.insert((drop.x, drop.y)) {
                errors.push(format!(
                    "Item '{}' shares tile ({}, {}) with another item",
                    drop.item, drop.x, drop.y
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAPTER: &str = r#"
        ScenarioData(
            name: "tutorial",
            chapter: 1,
            legend: {
                '.': 0xFFBDFE98,
                'f': 0xFF319D20,
            },
            layout: [
                "..f",
                ".ff",
            ],
            deployments: [
                Deployment(name: "Lyn", class: Mercenary, x: 0, y: 0, weapon: Some("Iron Sword")),
                Deployment(name: "Batta", class: Brigand, x: 2, y: 1, movement: Some(3)),
            ],
            items: [
                ItemDrop(item: "Vulnerary", x: 1, y: 1),
            ],
        )
    "#;

    #[test]
    fn test_parse_chapter() {
        let data = ScenarioData::from_ron(CHAPTER).unwrap();
        assert_eq!(data.name, "tutorial");
        assert_eq!(data.dimensions(), (3, 2));
        assert_eq!(data.legend.get(&'f'), Some(&TerrainCode(0xFF31_9D20)));
        assert_eq!(data.deployments[1].movement, Some(3));
        assert_eq!(data.deployments[1].weapon, None);
        assert!(data.validate().is_empty(), "{:?}", data.validate());
    }

    #[test]
    fn test_terrain_codes_row_major() {
        let data = ScenarioData::from_ron(CHAPTER).unwrap();
        let codes = data.terrain_codes().unwrap();
        assert_eq!(codes.len(), 6);
        assert_eq!(codes[2], TerrainCode(0xFF31_9D20));
        assert_eq!(codes[3], TerrainCode(0xFFBD_FE98));
    }

    #[test]
    fn test_missing_legend_entry() {
        let mut data = ScenarioData::from_ron(CHAPTER).unwrap();
        data.layout[0] = "..x".to_string();
        assert!(matches!(data.terrain_codes(), Err(MapError::InvalidScenario(_))));
        assert_eq!(data.validate().len(), 1);
    }

    #[test]
    fn test_validate_rejects_unknown_legend_code() {
        let mut data = ScenarioData::from_ron(CHAPTER).unwrap();
        data.legend.insert('f', TerrainCode(0xFF31_9D21));
        data.legend.insert('x', TerrainCode(0xFF00_0001));

        let errors = data.validate();
        assert_eq!(
            errors,
            vec!["Legend character 'f' maps to unknown terrain code 0xFF319D21".to_string()]
        );
        assert!(matches!(
            data.build(),
            Err(MapError::UnknownTerrain { x: 2, y: 0, .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ScenarioData::from_ron("ScenarioData(name: 3)"),
            Err(MapError::ScenarioParse(_))
        ));
    }

    #[test]
    fn test_validate_reports_bad_references() {
        let mut data = ScenarioData::from_ron(CHAPTER).unwrap();
        data.deployments.push(Deployment {
            name: "Lyn".to_string(),
            class: FighterClass::Thief,
            x: 0,
            y: 0,
            weapon: Some("Iron Axe".to_string()),
            movement: None,
        });
        data.items.push(ItemDrop {
            item: "Excalibur".to_string(),
            x: 7,
            y: 0,
        });

        let errors = data.validate();
        assert!(errors.iter().any(|e| e.contains("Duplicate deployment name")));
        assert!(errors.iter().any(|e| e.contains("shares tile (0, 0)")));
        assert!(errors.iter().any(|e| e.contains("cannot equip 'Iron Axe'")));
        assert!(errors.iter().any(|e| e.contains("Unknown item 'Excalibur'")));
        assert!(errors.iter().any(|e| e.contains("is off the map")));
    }
}
