//! Sentient generation pipeline.
//!
//! One call, one shared RNG, fixed draw order:
//! faction → race → gear → (stats, no draws) → intelligence → name.
//! Seeding the RNG makes the whole record reproducible.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::allocator::allocate;
use crate::catalog::{self, GearCatalog, GearItem, RaceCatalog, RaceTemplate};
use crate::constants::FACTIONS;
use crate::error::GenerationError;
use crate::intelligence::{roll_intelligence, Intelligence};
use crate::names::random_name;
use crate::rank::Rank;
use crate::select::{pick, pick_index};
use crate::stats::combine;

/// A generated character. Owns copies of its race and gear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSentient {
    pub name: String,
    pub rank: Rank,
    pub faction: String,
    pub race_key: String,
    pub race: RaceTemplate,
    pub intelligence_roll: u8,
    pub intelligence_label: Intelligence,
    /// Reserved for per-race abilities; always empty for now.
    pub abilities: Vec<String>,
    pub gear: Vec<GearItem>,
    pub stats: BTreeMap<String, f64>,
    /// Clamped to \[-1.0, 1.0\].
    pub resists: BTreeMap<String, f64>,
}

/// Per-race ability hook. Returns nothing and draws nothing until race
/// ability tables exist.
pub fn abilities_for_race<R: Rng + ?Sized>(
    _rank: Rank,
    _race_key: &str,
    _rng: &mut R,
) -> Vec<String> {
    Vec::new()
}

/// Generate one sentient of `rank`.
pub fn generate<R: Rng + ?Sized>(
    rank: Rank,
    races: &RaceCatalog,
    gear: &GearCatalog,
    rng: &mut R,
) -> Result<GeneratedSentient, GenerationError> {
    if races.is_empty() {
        return Err(GenerationError::EmptyRaceCatalog);
    }

    let faction = pick(&FACTIONS, rng).unwrap_or_default().to_string();

    let race_idx = pick_index(races.len(), rng).ok_or(GenerationError::EmptyRaceCatalog)?;
    let race = &races.templates()[race_idx];
    let race_key = race.key();

    let loadout = allocate(rank, &faction, gear, rng);
    let combined = combine(race, &loadout);
    let (intelligence_roll, intelligence_label) = roll_intelligence(rng);
    let name = random_name(rng);
    let abilities = abilities_for_race(rank, &race_key, rng);

    log::debug!(
        "generated {} {} ({}, {}) with {} items",
        rank,
        name,
        race_key,
        faction,
        loadout.len()
    );

    Ok(GeneratedSentient {
        name,
        rank,
        faction,
        race_key,
        race: race.clone(),
        intelligence_roll,
        intelligence_label,
        abilities,
        gear: loadout,
        stats: combined.stats,
        resists: combined.resists,
    })
}

/// Like [`generate`], but takes the rank by name. An unknown rank fails
/// before any randomness is consumed.
pub fn generate_named<R: Rng + ?Sized>(
    rank_name: &str,
    races: &RaceCatalog,
    gear: &GearCatalog,
    rng: &mut R,
) -> Result<GeneratedSentient, GenerationError> {
    let rank: Rank = rank_name.parse()?;
    generate(rank, races, gear, rng)
}

/// Both catalogs, loaded once and shared read-only between generation calls.
///
/// Holds no RNG: each caller brings its own, so one forge can serve many
/// threads.
#[derive(Debug, Clone, Default)]
pub struct SentientForge {
    races: RaceCatalog,
    gear: GearCatalog,
}

impl SentientForge {
    pub fn new(races: RaceCatalog, gear: GearCatalog) -> Self {
        Self { races, gear }
    }

    /// Build from the JSON exports of the race and gear tables.
    pub fn from_json(races_json: &str, gear_json: &str) -> Result<Self, GenerationError> {
        let races = catalog::races_from_json(races_json)?;
        let gear = catalog::gear_from_json(gear_json)?;
        Ok(Self::new(races, gear))
    }

    pub fn races(&self) -> &RaceCatalog {
        &self.races
    }

    pub fn gear(&self) -> &GearCatalog {
        &self.gear
    }

    pub fn generate<R: Rng + ?Sized>(
        &self,
        rank: Rank,
        rng: &mut R,
    ) -> Result<GeneratedSentient, GenerationError> {
        generate(rank, &self.races, &self.gear, rng)
    }

    pub fn generate_named<R: Rng + ?Sized>(
        &self,
        rank_name: &str,
        rng: &mut R,
    ) -> Result<GeneratedSentient, GenerationError> {
        generate_named(rank_name, &self.races, &self.gear, rng)
    }
}
