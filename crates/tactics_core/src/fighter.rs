//! Fighter stat model and roster.
//!
//! A fighter is pure data: movement allowance, weapon ranks, the equipped
//! weapon (which decides the attack range band) and the per-turn moved
//! flag. Fighters are identified by a stable [`FighterId`] handed out by a
//! [`Roster`]; the battle map keys its placement table by that id.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::items::{RangeBand, Weapon, WeaponCategory, WeaponRanks};

/// Stable handle for a fighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FighterId(pub u32);

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Combat attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current hit points.
    pub hp: u32,
    /// Maximum hit points.
    pub hp_max: u32,
    /// Physical attack.
    pub strength: u32,
    /// Magical attack.
    pub magic: u32,
    /// Attack speed.
    pub speed: u32,
    /// Luck.
    pub luck: u32,
    /// Physical defense.
    pub defense: u32,
    /// Magical defense.
    pub resistance: u32,
    /// Build - offsets weapon weight.
    pub constitution: u32,
    /// Body weight, used by rescue checks.
    pub weight: u32,
}

/// Fighter classes with their base profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FighterClass {
    /// Fast knife user.
    Thief,
    /// Sword infantry.
    Mercenary,
    /// Lance infantry.
    Soldier,
    /// Axe infantry.
    Brigand,
    /// Bow user.
    Archer,
    /// Anima caster.
    Mage,
    /// Light caster.
    Monk,
    /// Dark caster.
    Shaman,
    /// Staff healer.
    Cleric,
    /// Armoured lance user.
    Knight,
    /// Mounted sword and lance user.
    Cavalier,
}

/// Base stats, movement and weapon ranks for a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassProfile {
    /// Starting stats (at full HP).
    pub stats: Stats,
    /// Movement points per turn.
    pub movement: u32,
    /// Starting weapon ranks.
    pub ranks: WeaponRanks,
}

const fn stats(
    hp: u32,
    strength: u32,
    magic: u32,
    speed: u32,
    luck: u32,
    defense: u32,
    resistance: u32,
    constitution: u32,
) -> Stats {
    Stats {
        hp,
        hp_max: hp,
        strength,
        magic,
        speed,
        luck,
        defense,
        resistance,
        constitution,
        weight: constitution,
    }
}

impl FighterClass {
    /// Every class.
    pub const ALL: [FighterClass; 11] = [
        FighterClass::Thief,
        FighterClass::Mercenary,
        FighterClass::Soldier,
        FighterClass::Brigand,
        FighterClass::Archer,
        FighterClass::Mage,
        FighterClass::Monk,
        FighterClass::Shaman,
        FighterClass::Cleric,
        FighterClass::Knight,
        FighterClass::Cavalier,
    ];

    /// Base profile for this class.
    #[must_use]
    pub fn profile(self) -> ClassProfile {
        use WeaponCategory::*;

        let only = |category| WeaponRanks::new().with(category, 1);

        let (stats, movement, ranks) = match self {
            Self::Thief => (stats(20, 5, 1, 11, 5, 4, 0, 6), 7, only(Knife)),
            Self::Mercenary => (stats(22, 7, 0, 9, 4, 5, 0, 9), 5, only(Sword)),
            Self::Soldier => (stats(24, 7, 0, 5, 2, 7, 0, 10), 5, only(Lance)),
            Self::Brigand => (stats(26, 8, 0, 6, 3, 4, 0, 11), 5, only(Axe)),
            Self::Archer => (stats(20, 6, 0, 6, 3, 4, 1, 7), 5, only(Bow)),
            Self::Mage => (stats(16, 0, 5, 6, 4, 2, 4, 5), 5, only(AnimaBook)),
            Self::Monk => (stats(17, 0, 4, 6, 5, 2, 5, 6), 5, only(LightBook)),
            Self::Shaman => (stats(18, 0, 5, 5, 2, 2, 4, 7), 5, only(DarkBook)),
            Self::Cleric => (stats(16, 0, 3, 5, 6, 1, 6, 5), 5, only(Staff)),
            Self::Knight => (stats(25, 9, 0, 2, 1, 10, 0, 13), 4, only(Lance)),
            Self::Cavalier => (
                stats(23, 7, 0, 6, 3, 6, 1, 9),
                7,
                WeaponRanks::new().with(Sword, 1).with(Lance, 1),
            ),
        };

        ClassProfile {
            stats,
            movement,
            ranks,
        }
    }

    /// Default display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Thief => "Thief",
            Self::Mercenary => "Mercenary",
            Self::Soldier => "Soldier",
            Self::Brigand => "Brigand",
            Self::Archer => "Archer",
            Self::Mage => "Mage",
            Self::Monk => "Monk",
            Self::Shaman => "Shaman",
            Self::Cleric => "Cleric",
            Self::Knight => "Knight",
            Self::Cavalier => "Cavalier",
        }
    }
}

/// A unit on (or off) the battlefield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    id: FighterId,
    name: String,
    class: FighterClass,
    stats: Stats,
    /// Movement points left this turn.
    movement: u32,
    movement_max: u32,
    ranks: WeaponRanks,
    equipped: Option<Weapon>,
    has_moved: bool,
}

impl Fighter {
    /// Create a fighter from its class profile, unarmed and ready to act.
    #[must_use]
    pub fn new(id: FighterId, name: impl Into<String>, class: FighterClass) -> Self {
        let profile = class.profile();
        Self {
            id,
            name: name.into(),
            class,
            stats: profile.stats,
            movement: profile.movement,
            movement_max: profile.movement,
            ranks: profile.ranks,
            equipped: None,
            has_moved: false,
        }
    }

    /// Override the movement allowance (both current and per-turn).
    #[must_use]
    pub fn with_movement(mut self, movement: u32) -> Self {
        self.movement = movement;
        self.movement_max = movement;
        self
    }

    /// Equip a weapon, builder style.
    pub fn with_weapon(mut self, weapon: Weapon) -> Result<Self> {
        self.equip(weapon)?;
        Ok(self)
    }

    /// Stable handle.
    #[must_use]
    pub const fn id(&self) -> FighterId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class.
    #[must_use]
    pub const fn class(&self) -> FighterClass {
        self.class
    }

    /// Current stats.
    #[must_use]
    pub const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Mutable stats, for level-ups and damage applied by combat resolution.
    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// Movement points remaining this turn.
    #[must_use]
    pub const fn movement(&self) -> u32 {
        self.movement
    }

    /// Movement points restored each turn.
    #[must_use]
    pub const fn movement_max(&self) -> u32 {
        self.movement_max
    }

    /// Weapon ranks.
    #[must_use]
    pub const fn ranks(&self) -> &WeaponRanks {
        &self.ranks
    }

    /// Rank in one weapon category.
    #[must_use]
    pub fn weapon_rank(&self, category: WeaponCategory) -> u8 {
        self.ranks.rank(category)
    }

    /// Mutable ranks, for weapon experience gains.
    pub fn ranks_mut(&mut self) -> &mut WeaponRanks {
        &mut self.ranks
    }

    /// Currently equipped weapon.
    #[must_use]
    pub const fn equipped(&self) -> Option<&Weapon> {
        self.equipped.as_ref()
    }

    /// Attack range band: the equipped weapon's, melee when unarmed.
    #[must_use]
    pub fn range(&self) -> RangeBand {
        self.equipped.as_ref().map_or(RangeBand::MELEE, |w| w.range)
    }

    /// Closest attack distance.
    #[must_use]
    pub fn min_range(&self) -> u32 {
        self.range().min
    }

    /// Furthest attack distance.
    #[must_use]
    pub fn max_range(&self) -> u32 {
        self.range().max
    }

    /// Whether the fighter already acted this turn.
    #[must_use]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Equip a weapon, returning the previously equipped one.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CannotEquip`] if the fighter's rank in the
    /// weapon's category is below the weapon's rank. The current weapon is
    /// kept in that case.
    pub fn equip(&mut self, weapon: Weapon) -> Result<Option<Weapon>> {
        if !weapon.can_equip(self) {
            return Err(MapError::CannotEquip {
                fighter: self.id,
                item: weapon.name,
            });
        }
        Ok(self.equipped.replace(weapon))
    }

    /// Remove the equipped weapon.
    pub fn unequip(&mut self) -> Option<Weapon> {
        self.equipped.take()
    }

    /// Spend movement points after a move and flag the fighter as moved.
    ///
    /// Spending more than remains leaves zero points.
    pub fn spend_movement(&mut self, points: u32) {
        self.movement = self.movement.saturating_sub(points);
        self.has_moved = true;
    }

    /// Mark the fighter as done for this turn without moving.
    pub fn wait(&mut self) {
        self.has_moved = true;
    }

    /// Restore movement and clear the moved flag for a new turn.
    pub fn refresh(&mut self) {
        self.movement = self.movement_max;
        self.has_moved = false;
    }
}

/// Fighters by stable id.
///
/// Ids are allocated sequentially from 1 and never reused, so a dismissed
/// fighter's id stays unique for the rest of the battle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    fighters: BTreeMap<FighterId, Fighter>,
    next_id: u32,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fighters: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Enlist a new fighter built from its class profile and return its id.
    pub fn enlist(&mut self, name: impl Into<String>, class: FighterClass) -> FighterId {
        self.enlist_with(|id| Fighter::new(id, name, class))
    }

    /// Enlist a fighter produced by `build`, which receives the new id.
    pub fn enlist_with(&mut self, build: impl FnOnce(FighterId) -> Fighter) -> FighterId {
        let id = FighterId(self.next_id);
        self.next_id += 1;

        let mut fighter = build(id);
        fighter.id = id;
        tracing::debug!(fighter = %id, name = fighter.name(), "Enlisted fighter");
        self.fighters.insert(id, fighter);
        id
    }

    /// Remove a fighter from the roster.
    pub fn dismiss(&mut self, id: FighterId) -> Option<Fighter> {
        self.fighters.remove(&id)
    }

    /// Get a fighter by id.
    #[must_use]
    pub fn get(&self, id: FighterId) -> Option<&Fighter> {
        self.fighters.get(&id)
    }

    /// Get a mutable fighter by id.
    pub fn get_mut(&mut self, id: FighterId) -> Option<&mut Fighter> {
        self.fighters.get_mut(&id)
    }

    /// Get a fighter by id or fail with [`MapError::UnknownFighter`].
    pub fn require(&self, id: FighterId) -> Result<&Fighter> {
        self.get(id).ok_or(MapError::UnknownFighter(id))
    }

    /// First fighter with the given name, in id order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Fighter> {
        self.fighters.values().find(|f| f.name == name)
    }

    /// Fighters in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Fighter> {
        self.fighters.values()
    }

    /// Start a new turn for every fighter.
    pub fn refresh_all(&mut self) {
        for fighter in self.fighters.values_mut() {
            fighter.refresh();
        }
    }

    /// Number of enlisted fighters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    /// Check if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::armory;

    #[test]
    fn test_thief_profile() {
        let thief = Fighter::new(FighterId(1), "Chad", FighterClass::Thief);
        assert_eq!(thief.stats().hp, 20);
        assert_eq!(thief.stats().hp_max, 20);
        assert_eq!(thief.stats().speed, 11);
        assert_eq!(thief.movement(), 7);
        assert_eq!(thief.weapon_rank(WeaponCategory::Knife), 1);
        assert_eq!(thief.weapon_rank(WeaponCategory::Sword), 0);
        assert!(!thief.has_moved());
    }

    #[test]
    fn test_unarmed_range_is_melee() {
        let fighter = Fighter::new(FighterId(1), "Dart", FighterClass::Brigand);
        assert_eq!(fighter.range(), RangeBand::MELEE);
        assert_eq!(fighter.min_range(), 1);
        assert_eq!(fighter.max_range(), 1);
    }

    #[test]
    fn test_equip_sets_range() {
        let mut archer = Fighter::new(FighterId(1), "Rebecca", FighterClass::Archer);
        assert!(archer.equip(armory::iron_bow()).unwrap().is_none());
        assert_eq!(archer.min_range(), 2);
        assert_eq!(archer.max_range(), 2);

        let removed = archer.unequip().unwrap();
        assert_eq!(removed.name, "Iron Bow");
        assert_eq!(archer.range(), RangeBand::MELEE);
    }

    #[test]
    fn test_equip_rejects_untrained_category() {
        let mut thief = Fighter::new(FighterId(3), "Chad", FighterClass::Thief)
            .with_weapon(armory::iron_knife())
            .unwrap();
        let result = thief.equip(armory::iron_axe());
        assert!(matches!(
            result,
            Err(MapError::CannotEquip { fighter: FighterId(3), .. })
        ));
        assert_eq!(thief.equipped().map(|w| w.name.as_str()), Some("Iron Knife"));
    }

    #[test]
    fn test_movement_spend_and_refresh() {
        let mut fighter = Fighter::new(FighterId(1), "Oswin", FighterClass::Knight);
        assert_eq!(fighter.movement(), 4);

        fighter.spend_movement(3);
        assert_eq!(fighter.movement(), 1);
        assert!(fighter.has_moved());

        fighter.spend_movement(5);
        assert_eq!(fighter.movement(), 0);

        fighter.refresh();
        assert_eq!(fighter.movement(), 4);
        assert!(!fighter.has_moved());
    }

    #[test]
    fn test_with_movement_override() {
        let fighter = Fighter::new(FighterId(1), "Test", FighterClass::Soldier).with_movement(2);
        assert_eq!(fighter.movement(), 2);
        assert_eq!(fighter.movement_max(), 2);
    }

    #[test]
    fn test_roster_allocates_sequential_ids() {
        let mut roster = Roster::new();
        let a = roster.enlist("Lyn", FighterClass::Mercenary);
        let b = roster.enlist("Kent", FighterClass::Cavalier);
        assert_eq!(a, FighterId(1));
        assert_eq!(b, FighterId(2));
        assert_eq!(roster.len(), 2);

        roster.dismiss(a);
        let c = roster.enlist("Sain", FighterClass::Cavalier);
        assert_eq!(c, FighterId(3));
        assert!(roster.get(a).is_none());
        assert!(matches!(roster.require(a), Err(MapError::UnknownFighter(_))));
    }

    #[test]
    fn test_roster_enlist_with_overrides_id() {
        let mut roster = Roster::new();
        let id = roster.enlist_with(|_| Fighter::new(FighterId(99), "Erk", FighterClass::Mage));
        assert_eq!(id, FighterId(1));
        assert_eq!(roster.get(id).unwrap().id(), FighterId(1));
    }

    #[test]
    fn test_roster_find_and_refresh() {
        let mut roster = Roster::new();
        let id = roster.enlist("Serra", FighterClass::Cleric);
        roster.get_mut(id).unwrap().wait();
        assert!(roster.find_by_name("Serra").unwrap().has_moved());

        roster.refresh_all();
        assert!(!roster.find_by_name("Serra").unwrap().has_moved());
        assert!(roster.find_by_name("Nobody").is_none());
    }

    #[test]
    fn test_every_class_profile_is_consistent() {
        for class in FighterClass::ALL {
            let profile = class.profile();
            assert!(profile.movement > 0, "{} has no movement", class.name());
            assert_eq!(profile.stats.hp, profile.stats.hp_max);
            assert!(profile.ranks.trained().count() >= 1);
        }
    }
}
