//! Sentient ranks, the difficulty tiers that drive the gear budget.
//!
//! Each rank guarantees one item of its required rarity and grants extra
//! gold on top of that item's cost for the random fill.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::rarity::Rarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Weakling,
    #[serde(rename = "Prime Weakling")]
    PrimeWeakling,
    Elite,
    #[serde(rename = "Prime Elite")]
    PrimeElite,
    Boss,
    #[serde(rename = "Prime Boss")]
    PrimeBoss,
    Guardian,
}

impl Rank {
    /// Rarity of the item this rank is guaranteed to carry.
    pub fn required_rarity(self) -> Rarity {
        match self {
            Rank::Weakling => Rarity::Common,
            Rank::PrimeWeakling => Rarity::Uncommon,
            Rank::Elite => Rarity::Rare,
            Rank::PrimeElite => Rarity::Epic,
            Rank::Boss => Rarity::Legendary,
            Rank::PrimeBoss => Rarity::Legendary,
            Rank::Guardian => Rarity::Mythic,
        }
    }

    /// Gold available beyond the guaranteed item.
    pub fn extra_gold(self) -> u32 {
        match self {
            Rank::Weakling => 200,
            Rank::PrimeWeakling => 200,
            Rank::Elite => 400,
            Rank::PrimeElite => 400,
            Rank::Boss => 600,
            Rank::PrimeBoss => 800,
            Rank::Guardian => 1000,
        }
    }

    /// Total gear budget: guaranteed item cost plus extra gold.
    pub fn budget(self) -> u32 {
        self.required_rarity().cost() + self.extra_gold()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Rank::Weakling => "Weakling",
            Rank::PrimeWeakling => "Prime Weakling",
            Rank::Elite => "Elite",
            Rank::PrimeElite => "Prime Elite",
            Rank::Boss => "Boss",
            Rank::PrimeBoss => "Prime Boss",
            Rank::Guardian => "Guardian",
        }
    }

    /// All ranks, weakest first.
    pub fn all() -> &'static [Rank] {
        &[
            Rank::Weakling,
            Rank::PrimeWeakling,
            Rank::Elite,
            Rank::PrimeElite,
            Rank::Boss,
            Rank::PrimeBoss,
            Rank::Guardian,
        ]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lowercase and strip separators so "Prime Boss", "prime_boss" and
/// "PRIME-BOSS" compare equal.
fn rank_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Rank {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = rank_key(s);
        Rank::all()
            .iter()
            .copied()
            .find(|r| rank_key(r.display_name()) == key)
            .ok_or_else(|| GenerationError::UnknownRank(s.to_string()))
    }
}
