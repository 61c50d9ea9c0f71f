//! Building battles from scenario data.
//!
//! Terrain comes in as raw codes (one per tile, row-major). A map is only
//! produced when every code resolves through the terrain catalog.

use crate::battle::Battle;
use crate::battle_map::BattleMap;
use crate::data::ScenarioData;
use crate::error::{MapError, Result};
use crate::fighter::Fighter;
use crate::items::armory;
use crate::terrain::TerrainCode;

/// Decode a terrain layer into a map with no fighters and no items.
///
/// # Errors
///
/// - [`MapError::InvalidDimensions`] if `codes` does not hold exactly
///   `width * height` entries.
/// - [`MapError::UnknownTerrain`] for the first code with no catalog entry.
pub fn load_terrain(width: u32, height: u32, codes: &[TerrainCode]) -> Result<BattleMap> {
    let map = BattleMap::from_codes(width, height, codes)?;
    tracing::debug!(
        width,
        height,
        distinct = map.terrains().len(),
        "Loaded terrain layer"
    );
    Ok(map)
}

impl ScenarioData {
    /// Build the opening state of this chapter.
    ///
    /// Deployments are enlisted in file order, so the first one gets
    /// `FighterId(1)`.
    ///
    /// # Errors
    ///
    /// Any layout, terrain or placement problem aborts the build:
    /// - [`MapError::InvalidScenario`] for layout errors, duplicate names and
    ///   unknown armory names.
    /// - [`MapError::UnknownTerrain`] for a legend code with no catalog entry.
    /// - Placement errors from [`BattleMap::add_fighter`] and
    ///   [`BattleMap::place_item`].
    /// - [`MapError::CannotEquip`] for a weapon the class cannot wield.
    pub fn build(&self) -> Result<Battle> {
        let (width, height) = self.dimensions();
        let codes = self.terrain_codes()?;
        let mut battle = Battle::new(load_terrain(width, height, &codes)?);

        for deployment in &self.deployments {
            if battle.roster().find_by_name(&deployment.name).is_some() {
                return Err(MapError::InvalidScenario(format!(
                    "duplicate deployment name '{}'",
                    deployment.name
                )));
            }

            let weapon = match &deployment.weapon {
                Some(name) => Some(armory::weapon_by_name(name).ok_or_else(|| {
                    MapError::InvalidScenario(format!("unknown weapon '{name}'"))
                })?),
                None => None,
            };

            let mut equip_error = None;
            battle.deploy_with(
                |id| {
                    let mut fighter = Fighter::new(id, deployment.name.as_str(), deployment.class);
                    if let Some(movement) = deployment.movement {
                        fighter = fighter.with_movement(movement);
                    }
                    if let Some(weapon) = weapon {
                        if let Err(e) = fighter.equip(weapon) {
                            equip_error = Some(e);
                        }
                    }
                    fighter
                },
                deployment.x,
                deployment.y,
            )?;
            if let Some(e) = equip_error {
                return Err(e);
            }
        }

        for drop in &self.items {
            let item = armory::by_name(&drop.item).ok_or_else(|| {
                MapError::InvalidScenario(format!("unknown item '{}'", drop.item))
            })?;
            battle.map_mut().place_item(item, drop.x, drop.y)?;
        }

        tracing::info!(
            scenario = %self.name,
            chapter = self.chapter,
            width,
            height,
            fighters = battle.roster().len(),
            items = self.items.len(),
            "Built scenario"
        );
        Ok(battle)
    }
}
