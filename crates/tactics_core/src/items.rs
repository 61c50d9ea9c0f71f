//! Items: weapons, consumables and weapon ranks.
//!
//! A weapon's category and rank decide who may wield it: a fighter can
//! equip a weapon when its own rank in that category is at least the
//! weapon's rank. The equipped weapon supplies the fighter's attack range.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fighter::Fighter;

/// Weapon families. Each fighter holds a rank per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponCategory {
    /// Swords.
    Sword,
    /// Lances and javelins.
    Lance,
    /// Axes.
    Axe,
    /// Bows.
    Bow,
    /// Knives and daggers.
    Knife,
    /// Healing staves.
    Staff,
    /// Anima tomes.
    AnimaBook,
    /// Light tomes.
    LightBook,
    /// Dark tomes.
    DarkBook,
}

impl WeaponCategory {
    /// Whether this category is a spell tome.
    #[must_use]
    pub const fn is_book(self) -> bool {
        matches!(self, Self::AnimaBook | Self::LightBook | Self::DarkBook)
    }
}

/// Inclusive attack distance band, in Manhattan distance.
///
/// `min == max` denotes a weapon that only hits at exactly that distance
/// (melee when both are 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeBand {
    /// Closest distance that can be hit.
    pub min: u32,
    /// Furthest distance that can be hit.
    pub max: u32,
}

impl RangeBand {
    /// Melee range: adjacent tiles only.
    pub const MELEE: Self = Self { min: 1, max: 1 };

    /// Create a new range band.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "RangeBand min must not exceed max");
        Self { min, max }
    }

    /// Returns true if `distance` lies within `[min, max]`.
    #[must_use]
    pub const fn contains(self, distance: u32) -> bool {
        self.min <= distance && distance <= self.max
    }
}

impl Default for RangeBand {
    fn default() -> Self {
        Self::MELEE
    }
}

impl fmt::Display for RangeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// Weapon rank held by a fighter per category (0 = cannot wield).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponRanks(BTreeMap<WeaponCategory, u8>);

impl WeaponRanks {
    /// No ranks in any category.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style rank assignment.
    #[must_use]
    pub fn with(mut self, category: WeaponCategory, rank: u8) -> Self {
        self.set(category, rank);
        self
    }

    /// Set the rank for a category. A rank of zero removes it.
    pub fn set(&mut self, category: WeaponCategory, rank: u8) {
        if rank == 0 {
            self.0.remove(&category);
        } else {
            self.0.insert(category, rank);
        }
    }

    /// Rank in a category (0 when untrained).
    #[must_use]
    pub fn rank(&self, category: WeaponCategory) -> u8 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Categories with a non-zero rank, in category order.
    pub fn trained(&self) -> impl Iterator<Item = (WeaponCategory, u8)> + '_ {
        self.0.iter().map(|(c, r)| (*c, *r))
    }
}

/// A weapon definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Display name, also used as the lookup key in the armory.
    pub name: String,
    /// Weapon family.
    pub category: WeaponCategory,
    /// Minimum rank required in `category`.
    pub rank: u8,
    /// Base damage.
    pub might: u32,
    /// Base accuracy.
    pub hit: u32,
    /// Weight, compared against constitution.
    pub weight: u32,
    /// Distance band this weapon reaches.
    pub range: RangeBand,
    /// Remaining uses.
    pub uses: u32,
}

impl Weapon {
    /// Whether `fighter` meets this weapon's rank requirement.
    #[must_use]
    pub fn can_equip(&self, fighter: &Fighter) -> bool {
        let held = fighter.ranks().rank(self.category);
        held > 0 && self.rank <= held
    }
}

/// A single-use-per-turn consumable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumable {
    /// Display name.
    pub name: String,
    /// HP restored per use.
    pub heal: u32,
    /// Remaining uses.
    pub uses: u32,
}

/// Anything that can be carried or left lying on a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    /// A weapon.
    Weapon(Weapon),
    /// A consumable.
    Consumable(Consumable),
}

impl Item {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Weapon(w) => &w.name,
            Self::Consumable(c) => &c.name,
        }
    }
}

/// Built-in item definitions.
pub mod armory {
    use super::{Consumable, Item, RangeBand, Weapon, WeaponCategory};

    fn weapon(
        name: &str,
        category: WeaponCategory,
        might: u32,
        hit: u32,
        weight: u32,
        range: RangeBand,
        uses: u32,
    ) -> Weapon {
        Weapon {
            name: name.to_string(),
            category,
            rank: 1,
            might,
            hit,
            weight,
            range,
            uses,
        }
    }

    /// Iron Sword.
    #[must_use]
    pub fn iron_sword() -> Weapon {
        weapon("Iron Sword", WeaponCategory::Sword, 5, 90, 5, RangeBand::MELEE, 46)
    }

    /// Iron Lance.
    #[must_use]
    pub fn iron_lance() -> Weapon {
        weapon("Iron Lance", WeaponCategory::Lance, 7, 80, 8, RangeBand::MELEE, 45)
    }

    /// Javelin, thrown at one or two tiles.
    #[must_use]
    pub fn javelin() -> Weapon {
        weapon("Javelin", WeaponCategory::Lance, 6, 65, 11, RangeBand::new(1, 2), 20)
    }

    /// Iron Axe.
    #[must_use]
    pub fn iron_axe() -> Weapon {
        weapon("Iron Axe", WeaponCategory::Axe, 8, 75, 10, RangeBand::MELEE, 45)
    }

    /// Iron Bow, two tiles only.
    #[must_use]
    pub fn iron_bow() -> Weapon {
        weapon("Iron Bow", WeaponCategory::Bow, 6, 85, 5, RangeBand::new(2, 2), 45)
    }

    /// Iron Knife.
    #[must_use]
    pub fn iron_knife() -> Weapon {
        weapon("Iron Knife", WeaponCategory::Knife, 3, 95, 2, RangeBand::MELEE, 40)
    }

    /// Fire tome.
    #[must_use]
    pub fn fire() -> Weapon {
        weapon("Fire", WeaponCategory::AnimaBook, 5, 90, 4, RangeBand::new(1, 2), 40)
    }

    /// Lightning tome.
    #[must_use]
    pub fn lightning() -> Weapon {
        weapon("Lightning", WeaponCategory::LightBook, 4, 95, 6, RangeBand::new(1, 2), 35)
    }

    /// Flux tome.
    #[must_use]
    pub fn flux() -> Weapon {
        weapon("Flux", WeaponCategory::DarkBook, 7, 80, 8, RangeBand::new(1, 2), 45)
    }

    /// Heal staff.
    #[must_use]
    pub fn heal() -> Weapon {
        weapon("Heal", WeaponCategory::Staff, 0, 100, 1, RangeBand::MELEE, 30)
    }

    /// Vulnerary.
    #[must_use]
    pub fn vulnerary() -> Consumable {
        Consumable {
            name: "Vulnerary".to_string(),
            heal: 10,
            uses: 3,
        }
    }

    /// Look up any built-in item by its display name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Item> {
        let item = match name {
            "Iron Sword" => Item::Weapon(iron_sword()),
            "Iron Lance" => Item::Weapon(iron_lance()),
            "Javelin" => Item::Weapon(javelin()),
            "Iron Axe" => Item::Weapon(iron_axe()),
            "Iron Bow" => Item::Weapon(iron_bow()),
            "Iron Knife" => Item::Weapon(iron_knife()),
            "Fire" => Item::Weapon(fire()),
            "Lightning" => Item::Weapon(lightning()),
            "Flux" => Item::Weapon(flux()),
            "Heal" => Item::Weapon(heal()),
            "Vulnerary" => Item::Consumable(vulnerary()),
            _ => return None,
        };
        Some(item)
    }

    /// Look up a built-in weapon by its display name.
    #[must_use]
    pub fn weapon_by_name(name: &str) -> Option<Weapon> {
        match by_name(name)? {
            Item::Weapon(w) => Some(w),
            Item::Consumable(_) => None,
        }
    }
}
