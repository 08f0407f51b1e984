//! Gear rarity tiers and the fixed rarity → gold cost table.
//!
//! Item prices are a pure function of rarity; the authored "Gold Cost"
//! column on gear rows is informational only.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Six-tier quality enumeration, ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Gold cost of one item of this tier.
    pub fn cost(self) -> u32 {
        match self {
            Rarity::Common => 200,
            Rarity::Uncommon => 400,
            Rarity::Rare => 600,
            Rarity::Epic => 800,
            Rarity::Legendary => 1000,
            Rarity::Mythic => 2000,
        }
    }

    /// All tiers in ascending order.
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Mythic,
        ]
    }

    /// Cheapest cost any item can have. The allocator stops filling below this.
    pub fn min_cost() -> u32 {
        Rarity::all()
            .iter()
            .map(|r| r.cost())
            .min()
            .unwrap_or(0)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }

    /// Lenient parse of a rarity cell: trims and ignores case.
    /// Returns `None` for anything that is not one of the six tiers.
    pub fn parse_cell(value: &str) -> Option<Rarity> {
        let key = value.trim().to_lowercase();
        Rarity::all()
            .iter()
            .copied()
            .find(|r| r.as_str().to_lowercase() == key)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price of an item given its (possibly unknown) rarity.
pub fn cost_of(rarity: Option<Rarity>) -> u32 {
    rarity.map(Rarity::cost).unwrap_or(0)
}
