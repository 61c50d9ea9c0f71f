//! A battle: one map plus the roster of fighters fighting on it.
//!
//! `Battle` is the facade the presentation layer drives. It checks a move
//! against the mover's reachable tiles before touching the map, spends the
//! movement the path cost, and keeps the roster and the map in agreement
//! when a fighter leaves the field.

use crate::battle_map::BattleMap;
use crate::coord::Coord;
use crate::error::{MapError, Result};
use crate::fighter::{Fighter, FighterClass, FighterId, Roster};
use crate::reachability::ReachableTiles;

/// Map and roster for one battle.
#[derive(Debug, Clone)]
pub struct Battle {
    map: BattleMap,
    roster: Roster,
}

impl Battle {
    /// Start a battle on `map` with nobody deployed.
    #[must_use]
    pub fn new(map: BattleMap) -> Self {
        Self {
            map,
            roster: Roster::new(),
        }
    }

    /// The battlefield.
    #[must_use]
    pub const fn map(&self) -> &BattleMap {
        &self.map
    }

    /// Mutable battlefield, for item drops and scripted placement.
    pub fn map_mut(&mut self) -> &mut BattleMap {
        &mut self.map
    }

    /// Every fighter in the battle, placed or not.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable roster.
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Look up a fighter.
    pub fn fighter(&self, id: FighterId) -> Result<&Fighter> {
        self.roster.require(id)
    }

    /// Fighter standing on `coord`.
    #[must_use]
    pub fn fighter_at(&self, coord: Coord) -> Option<&Fighter> {
        self.map.fighter_at(coord).and_then(|id| self.roster.get(id))
    }

    /// Enlist a fighter of `class` and place it on `(x, y)`.
    ///
    /// Nothing is enlisted if placement fails.
    pub fn deploy(
        &mut self,
        name: impl Into<String>,
        class: FighterClass,
        x: i32,
        y: i32,
    ) -> Result<FighterId> {
        self.deploy_with(|id| Fighter::new(id, name, class), x, y)
    }

    /// Enlist the fighter produced by `build` and place it on `(x, y)`.
    ///
    /// Nothing is enlisted if placement fails.
    pub fn deploy_with(
        &mut self,
        build: impl FnOnce(FighterId) -> Fighter,
        x: i32,
        y: i32,
    ) -> Result<FighterId> {
        let id = self.roster.enlist_with(build);
        if let Err(e) = self.map.add_fighter(id, x, y) {
            self.roster.dismiss(id);
            return Err(e);
        }
        Ok(id)
    }

    /// Reachable and assailable tiles for a placed fighter.
    pub fn reachable_tiles(&self, id: FighterId) -> Result<ReachableTiles> {
        let fighter = self.roster.require(id)?;
        self.map.reachable_tiles(fighter)
    }

    /// Move a fighter to a reachable tile, spending the movement the path
    /// costs and marking it as moved. Returns the tile it left.
    ///
    /// # Errors
    ///
    /// - [`MapError::UnknownFighter`] / [`MapError::FighterNotPlaced`] for a
    ///   fighter that is not in the battle or not on the map.
    /// - [`MapError::OutOfReach`] if `(x, y)` is not reachable this turn.
    pub fn move_fighter(&mut self, id: FighterId, x: i32, y: i32) -> Result<Coord> {
        let tiles = self.reachable_tiles(id)?;
        let destination = Coord::new(x, y);
        let Some(left) = tiles.remaining_movement(destination) else {
            return Err(MapError::OutOfReach { fighter: id, x, y });
        };

        let from = self.map.move_fighter(id, x, y)?;
        let fighter = self
            .roster
            .get_mut(id)
            .ok_or(MapError::UnknownFighter(id))?;
        let spent = fighter.movement() - left;
        fighter.spend_movement(spent);
        Ok(from)
    }

    /// Whether `attacker` can hit `defender` from where they stand.
    pub fn can_hit(&self, attacker: FighterId, defender: FighterId) -> Result<bool> {
        let attacker = self.roster.require(attacker)?;
        let defender = self.roster.require(defender)?;
        self.map.can_hit(attacker, defender)
    }

    /// Fighters `attacker` can hit right now, in id order.
    pub fn targets_of(&self, attacker: FighterId) -> Result<Vec<FighterId>> {
        let fighter = self.roster.require(attacker)?;
        let mut targets = Vec::new();
        for (id, _) in self.map.fighters() {
            if id == attacker {
                continue;
            }
            let defender = self.roster.require(id)?;
            if self.map.can_hit(fighter, defender)? {
                targets.push(id);
            }
        }
        Ok(targets)
    }

    /// Take a fighter off the field and out of the roster.
    pub fn remove_fighter(&mut self, id: FighterId) -> Result<Fighter> {
        self.map.remove_fighter(id)?;
        self.roster.dismiss(id).ok_or(MapError::UnknownFighter(id))
    }

    /// Start a new turn: restore movement and clear moved flags.
    pub fn end_turn(&mut self) {
        self.roster.refresh_all();
        tracing::debug!(fighters = self.roster.len(), "Turn ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Terrain;

    fn battle() -> Battle {
        Battle::new(BattleMap::filled(6, 6, Terrain::Plain))
    }

    #[test]
    fn test_deploy_places_and_enlists() {
        let mut battle = battle();
        let id = battle.deploy("Lyn", FighterClass::Mercenary, 1, 1).unwrap();

        assert_eq!(battle.map().position_of(id), Some(Coord::new(1, 1)));
        assert_eq!(battle.fighter_at(Coord::new(1, 1)).map(|f| f.name()), Some("Lyn"));
    }

    #[test]
    fn test_failed_deploy_enlists_nobody() {
        let mut battle = battle();
        battle.deploy("Lyn", FighterClass::Mercenary, 1, 1).unwrap();

        assert!(battle.deploy("Kent", FighterClass::Cavalier, 1, 1).is_err());
        assert!(battle.deploy("Sain", FighterClass::Cavalier, 9, 9).is_err());
        assert_eq!(battle.roster().len(), 1);
    }

    #[test]
    fn test_move_spends_path_cost() {
        let mut battle = battle();
        let id = battle
            .deploy_with(
                |id| Fighter::new(id, "Lyn", FighterClass::Mercenary).with_movement(5),
                0,
                0,
            )
            .unwrap();

        let from = battle.move_fighter(id, 2, 1).unwrap();
        assert_eq!(from, Coord::new(0, 0));

        let lyn = battle.fighter(id).unwrap();
        assert_eq!(lyn.movement(), 2);
        assert!(lyn.has_moved());
        assert_eq!(battle.map().position_of(id), Some(Coord::new(2, 1)));
    }

    #[test]
    fn test_move_out_of_reach_is_rejected() {
        let mut battle = battle();
        let id = battle
            .deploy_with(
                |id| Fighter::new(id, "Oswin", FighterClass::Knight).with_movement(2),
                0,
                0,
            )
            .unwrap();

        assert!(matches!(
            battle.move_fighter(id, 3, 0),
            Err(MapError::OutOfReach { x: 3, y: 0, .. })
        ));
        assert_eq!(battle.map().position_of(id), Some(Coord::new(0, 0)));
        assert!(!battle.fighter(id).unwrap().has_moved());
    }

    #[test]
    fn test_targets_and_removal() {
        let mut battle = battle();
        let a = battle.deploy("A", FighterClass::Brigand, 2, 2).unwrap();
        let b = battle.deploy("B", FighterClass::Soldier, 2, 3).unwrap();
        let c = battle.deploy("C", FighterClass::Soldier, 5, 5).unwrap();

        assert_eq!(battle.targets_of(a).unwrap(), vec![b]);
        assert!(battle.can_hit(b, a).unwrap());
        assert!(!battle.can_hit(a, c).unwrap());

        let removed = battle.remove_fighter(b).unwrap();
        assert_eq!(removed.name(), "B");
        assert!(battle.targets_of(a).unwrap().is_empty());
        assert!(matches!(battle.fighter(b), Err(MapError::UnknownFighter(_))));
    }

    #[test]
    fn test_end_turn_restores_movement() {
        let mut battle = battle();
        let id = battle.deploy("Erk", FighterClass::Mage, 0, 0).unwrap();
        battle.move_fighter(id, 1, 0).unwrap();
        assert_eq!(battle.fighter(id).unwrap().movement(), 4);

        battle.end_turn();
        let erk = battle.fighter(id).unwrap();
        assert_eq!(erk.movement(), 5);
        assert!(!erk.has_moved());
    }
}
