//! Terrain catalog.
//!
//! Every tile of the battlefield is one of a closed set of terrain kinds.
//! Terrain values are `Copy` and carry no per-tile state, so a grid of
//! `Terrain` is a grid of shared references to the catalog entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw terrain identifier as produced by a scenario decoder.
///
/// The value is the ARGB colour of the tile in the scenario's layout image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainCode(pub u32);

impl fmt::Display for TerrainCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

/// Terrain kinds known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Terrain {
    /// Open field.
    Plain,
    /// Paved road.
    Road,
    /// Indoor floor.
    Floor,
    /// Short grass.
    Grass,
    /// Village houses.
    Village,
    /// Castle gate.
    Gate,
    /// Woods - slows movement, grants avoid.
    Forest,
    /// Sand - slows movement.
    Desert,
    /// Fortification.
    Fort,
    /// Indoor pillar.
    Pillar,
    /// Mountain - very slow.
    Mountain,
    /// Mountain peak.
    Peak,
    /// Open water.
    Sea,
    /// Chasm.
    Pit,
    /// Locked door.
    ClosedDoor,
}

impl Terrain {
    /// Every catalog entry, in declaration order.
    pub const ALL: [Terrain; 15] = [
        Terrain::Plain,
        Terrain::Road,
        Terrain::Floor,
        Terrain::Grass,
        Terrain::Village,
        Terrain::Gate,
        Terrain::Forest,
        Terrain::Desert,
        Terrain::Fort,
        Terrain::Pillar,
        Terrain::Mountain,
        Terrain::Peak,
        Terrain::Sea,
        Terrain::Pit,
        Terrain::ClosedDoor,
    ];

    /// Resolve a raw code through the catalog.
    ///
    /// Returns `None` for codes with no catalog entry.
    #[must_use]
    pub const fn from_code(code: TerrainCode) -> Option<Self> {
        let terrain = match code.0 {
            0xFFBD_FE98 => Self::Plain,
            0xFFFF_7F00 => Self::Road,
            0xFF1E_EC00 => Self::Floor,
            0xFF61_A546 => Self::Grass,
            0xFFF5_FFFE => Self::Village,
            0xFF11_21C8 => Self::Gate,
            0xFF31_9D20 => Self::Forest,
            0xFFF8_FC1A => Self::Desert,
            0xFF6E_6F80 => Self::Fort,
            0xFFAD_ADAD => Self::Pillar,
            0xFF8A_4F07 => Self::Mountain,
            0xFFCF_6A17 => Self::Peak,
            0xFF4E_F5F0 => Self::Sea,
            0xFF5E_4E40 => Self::Pit,
            0xFF00_0000 => Self::ClosedDoor,
            _ => return None,
        };
        Some(terrain)
    }

    /// The raw code this terrain is stored as in layout data.
    #[must_use]
    pub const fn code(self) -> TerrainCode {
        TerrainCode(match self {
            Self::Plain => 0xFFBD_FE98,
            Self::Road => 0xFFFF_7F00,
            Self::Floor => 0xFF1E_EC00,
            Self::Grass => 0xFF61_A546,
            Self::Village => 0xFFF5_FFFE,
            Self::Gate => 0xFF11_21C8,
            Self::Forest => 0xFF31_9D20,
            Self::Desert => 0xFFF8_FC1A,
            Self::Fort => 0xFF6E_6F80,
            Self::Pillar => 0xFFAD_ADAD,
            Self::Mountain => 0xFF8A_4F07,
            Self::Peak => 0xFFCF_6A17,
            Self::Sea => 0xFF4E_F5F0,
            Self::Pit => 0xFF5E_4E40,
            Self::ClosedDoor => 0xFF00_0000,
        })
    }

    /// Movement points consumed to enter a tile of this terrain.
    /// Returns `None` for impassable terrain.
    #[must_use]
    pub const fn movement_cost(self) -> Option<u32> {
        match self {
            Self::Plain | Self::Road | Self::Floor | Self::Grass | Self::Village | Self::Gate => {
                Some(1)
            }
            Self::Forest | Self::Desert | Self::Fort | Self::Pillar => Some(2),
            Self::Mountain => Some(4),
            Self::Peak | Self::Sea | Self::Pit | Self::ClosedDoor => None,
        }
    }

    /// Returns true if a fighter can ever enter this terrain.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        self.movement_cost().is_some()
    }

    /// Defense bonus granted to a fighter standing here.
    #[must_use]
    pub const fn defense_bonus(self) -> u32 {
        match self {
            Self::Gate => 3,
            Self::Fort | Self::Mountain | Self::Peak => 2,
            Self::Forest | Self::Pillar => 1,
            _ => 0,
        }
    }

    /// Avoid bonus (percentage points) granted to a fighter standing here.
    #[must_use]
    pub const fn avoid_bonus(self) -> u32 {
        match self {
            Self::Peak => 40,
            Self::Gate | Self::Mountain => 30,
            Self::Forest | Self::Fort | Self::Pillar => 20,
            Self::Village => 10,
            Self::Grass | Self::Desert => 5,
            _ => 0,
        }
    }

    /// Percentage of max HP restored at the start of a turn spent here.
    #[must_use]
    pub const fn heal_percent(self) -> u32 {
        match self {
            Self::Fort => 20,
            Self::Gate => 10,
            _ => 0,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "Plain",
            Self::Road => "Road",
            Self::Floor => "Floor",
            Self::Grass => "Grass",
            Self::Village => "Village",
            Self::Gate => "Gate",
            Self::Forest => "Forest",
            Self::Desert => "Desert",
            Self::Fort => "Fort",
            Self::Pillar => "Pillar",
            Self::Mountain => "Mountain",
            Self::Peak => "Peak",
            Self::Sea => "Sea",
            Self::Pit => "Pit",
            Self::ClosedDoor => "Closed Door",
        }
    }

    /// Single-character glyph for text views.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Plain => '.',
            Self::Road => '=',
            Self::Floor => '_',
            Self::Grass => ',',
            Self::Village => 'v',
            Self::Gate => 'G',
            Self::Forest => 'f',
            Self::Desert => 's',
            Self::Fort => 'F',
            Self::Pillar => 'I',
            Self::Mountain => 'm',
            Self::Peak => 'M',
            Self::Sea => '~',
            Self::Pit => 'O',
            Self::ClosedDoor => '#',
        }
    }

    /// Inverse of [`Terrain::symbol`].
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.symbol() == symbol)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
