//! Pure sentient generation logic.
//!
//! Builds randomized NPC "sentients" from two caller-supplied tables: a race
//! catalog and a gear catalog. Nothing here touches files, sockets or global
//! state; every random decision goes through an injected [`rand::Rng`], so a
//! seeded generator reproduces a sentient exactly.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`allocator`] | Budget-bounded gear selection (mandatory item, weapon, ammo, fill) |
//! | [`catalog`] | `RaceTemplate` / `GearItem` catalogs loaded from tables |
//! | [`cells`] | Spreadsheet cells and soft-failing number/percent/gold coercion |
//! | [`constants`] | Stat names, resistance channels, factions, markers |
//! | [`error`] | Catalog and generation errors |
//! | [`gear`] | Eligibility, handedness and ammo-kind predicates |
//! | [`intelligence`] | d20 intelligence roll and labels |
//! | [`names`] | Name pool |
//! | [`rank`] | Ranks, required rarity and budgets |
//! | [`rarity`] | Rarity tiers and the rarity → gold cost table |
//! | [`select`] | Uniform random choice helpers |
//! | [`sentient`] | Full generation pipeline and `SentientForge` |
//! | [`stats`] | Additive stat aggregation with clamped resistances |
//! | [`table`] | Tabular input and header schema resolution |

pub mod allocator;
pub mod catalog;
pub mod cells;
pub mod constants;
pub mod error;
pub mod gear;
pub mod intelligence;
pub mod names;
pub mod rank;
pub mod rarity;
pub mod select;
pub mod sentient;
pub mod stats;
pub mod table;

pub use allocator::{allocate, allocate_gear, GearAllocation};
pub use catalog::{load_gear, load_races, GearCatalog, GearItem, RaceCatalog, RaceTemplate};
pub use error::{CatalogError, GenerationError};
pub use rank::Rank;
pub use rarity::Rarity;
pub use sentient::{generate, generate_named, GeneratedSentient, SentientForge};
pub use stats::{combine, CombinedStats};
pub use table::Table;
