//! Race and gear catalogs built from spreadsheet tables.
//!
//! Loading is pure data transformation: headers are resolved once through
//! [`Schema`](crate::table::Schema), each row is coerced cell by cell with the soft-failing helpers
//! in [`crate::cells`], and unusable rows are skipped. The only hard failure
//! is a missing required column.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::cells::{self, Cell};
use crate::constants::{resists, stats};
use crate::error::{CatalogError, TableKind};
use crate::gear::{has_usable_name, is_placeholder_name};
use crate::rarity::Rarity;
use crate::table::{Column, Table};

/// Base stats and resistances for one race + subtype.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceTemplate {
    pub race: String,
    pub subtype: String,
    pub kin: String,
    pub base_stats: BTreeMap<String, f64>,
    /// Decimal fractions, one per resistance channel.
    pub resists: BTreeMap<String, f64>,
    pub conditions: String,
}

impl RaceTemplate {
    /// Catalog key, e.g. `"Human:Dunian"`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.race, self.subtype)
    }
}

/// One equippable item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GearItem {
    /// Row index in the source table; stable across loads of the same sheet.
    pub id: usize,
    pub name: String,
    /// `None` when the rarity cell names no known tier. Such items cost 0.
    pub rarity: Option<Rarity>,
    /// Weapon / Armor / Ammunition / Accessory / Artifact ...
    pub gear_type: String,
    /// One-Handed / Two-Handed / Leg Piece / Ammunition Slot ...
    pub slot_type: String,
    /// Empty or "Any" for unrestricted items.
    pub faction: String,
    pub stats: BTreeMap<String, f64>,
    pub resists: BTreeMap<String, f64>,
    /// Authored price text, parsed. Display only; pricing uses rarity.
    pub gold_cost: i64,
    /// e.g. "Quiver", "Pouch"; only meaningful on weapons.
    pub ammo_requirement: Option<String>,
    /// Bow / Crossbow / Pistol / Rifle ...
    pub weapon_group: Option<String>,
    /// Preformatted text from the first column of the sheet.
    pub summary: String,
}

impl GearItem {
    /// Gold price charged by the allocator.
    pub fn cost(&self) -> u32 {
        crate::rarity::cost_of(self.rarity)
    }
}

/// Race templates keyed by `"Race:Subtype"`, in sheet order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<RaceTemplate>", into = "Vec<RaceTemplate>")]
pub struct RaceCatalog {
    templates: Vec<RaceTemplate>,
    index: HashMap<String, usize>,
}

impl RaceCatalog {
    /// Insert a template. A repeated key replaces the earlier template in place.
    pub fn insert(&mut self, template: RaceTemplate) {
        let key = template.key();
        match self.index.get(&key) {
            Some(&i) => self.templates[i] = template,
            None => {
                self.index.insert(key, self.templates.len());
                self.templates.push(template);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&RaceTemplate> {
        self.index.get(key).map(|&i| &self.templates[i])
    }

    /// Templates in sheet order.
    pub fn templates(&self) -> &[RaceTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl From<Vec<RaceTemplate>> for RaceCatalog {
    fn from(templates: Vec<RaceTemplate>) -> Self {
        templates.into_iter().collect()
    }
}

impl From<RaceCatalog> for Vec<RaceTemplate> {
    fn from(catalog: RaceCatalog) -> Self {
        catalog.templates
    }
}

impl FromIterator<RaceTemplate> for RaceCatalog {
    fn from_iter<I: IntoIterator<Item = RaceTemplate>>(iter: I) -> Self {
        let mut catalog = RaceCatalog::default();
        for t in iter {
            catalog.insert(t);
        }
        catalog
    }
}

/// Gear items keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GearCatalog {
    items: BTreeMap<usize, GearItem>,
}

impl GearCatalog {
    pub fn insert(&mut self, item: GearItem) {
        self.items.insert(item.id, item);
    }

    pub fn get(&self, id: usize) -> Option<&GearItem> {
        self.items.get(&id)
    }

    /// Items in ascending id order.
    pub fn items(&self) -> impl Iterator<Item = &GearItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<GearItem> for GearCatalog {
    fn from_iter<I: IntoIterator<Item = GearItem>>(iter: I) -> Self {
        GearCatalog {
            items: iter.into_iter().map(|g| (g.id, g)).collect(),
        }
    }
}

// ── Header variants ───────────────────────────────────────────────────

/// Race sheet resistance headers (`LIGHT Resistance`, with stray NBSPs) and
/// the short form some exports use.
fn race_resist_variants(channel: &str) -> [String; 2] {
    [format!("{} Resistance", channel), channel.to_string()]
}

/// Gear sheet resistance headers.
fn gear_resist_variants(channel: &str) -> [String; 1] {
    [format!("{} Resistance", channel)]
}

fn resolve<const N: usize>(schema: &crate::table::Schema, variants: [String; N]) -> Column {
    let refs: Vec<&str> = variants.iter().map(String::as_str).collect();
    schema.optional(&refs)
}

// ── Race loading ──────────────────────────────────────────────────────

struct RaceColumns {
    race: Column,
    subtype: Column,
    kin: Column,
    conditions: Column,
    base: Vec<(&'static str, Column)>,
    fortitude: Column,
    deflection: Column,
    resists: Vec<(&'static str, Column)>,
}

impl RaceColumns {
    fn resolve(table: &Table) -> Result<Self, CatalogError> {
        let schema = table.schema(TableKind::Race);
        Ok(Self {
            race: schema.required("RACES", &["RACES", "RACE"])?,
            subtype: schema.required("SUBTYPES", &["SUBTYPES", "SUBTYPE"])?,
            kin: schema.optional(&["KIN"]),
            conditions: schema.optional(&["CONDITIONS"]),
            base: stats::BASE
                .iter()
                .map(|&s| (s, schema.optional(&[s])))
                .collect(),
            fortitude: schema.optional(&[stats::FORTITUDE]),
            deflection: schema.optional(&[stats::DEFLECTION]),
            resists: resists::ALL
                .iter()
                .map(|&r| (r, resolve(&schema, race_resist_variants(r))))
                .collect(),
        })
    }
}

/// Build the race catalog.
///
/// Rows missing a race or subtype are skipped. The KIN column is only filled
/// on the first row of each group, so its last non-blank value carries down.
pub fn load_races(table: &Table) -> Result<RaceCatalog, CatalogError> {
    let cols = RaceColumns::resolve(table)?;
    let mut catalog = RaceCatalog::default();
    let mut kin = String::new();
    let mut skipped = 0usize;

    for (idx, row) in table.rows.iter().enumerate() {
        if let Some(k) = cols.kin.text(row) {
            kin = k;
        }

        let (Some(race), Some(subtype)) = (cols.race.text(row), cols.subtype.text(row)) else {
            log::debug!("race row {} skipped: no race/subtype", idx);
            skipped += 1;
            continue;
        };

        let mut base_stats: BTreeMap<String, f64> = cols
            .base
            .iter()
            .map(|(name, col)| (name.to_string(), cells::number(col.cell(row), 0.0)))
            .collect();
        base_stats.insert(
            stats::FORTITUDE.to_string(),
            cells::percent(cols.fortitude.cell(row), 0.0),
        );
        base_stats.insert(
            stats::DEFLECTION.to_string(),
            cells::percent(cols.deflection.cell(row), 0.0),
        );

        let resists = cols
            .resists
            .iter()
            .map(|(name, col)| (name.to_string(), cells::percent(col.cell(row), 0.0)))
            .collect();

        catalog.insert(RaceTemplate {
            race,
            subtype,
            kin: kin.clone(),
            base_stats,
            resists,
            conditions: cols.conditions.text_or_empty(row),
        });
    }

    log::info!(
        "Loaded {} race templates ({} rows skipped)",
        catalog.len(),
        skipped
    );
    Ok(catalog)
}

// ── Gear loading ──────────────────────────────────────────────────────

struct GearColumns {
    summary: Column,
    name: Column,
    rarity: Column,
    gear_type: Column,
    slot_type: Column,
    faction: Column,
    gold_cost: Column,
    ammo_requirement: Column,
    weapon_group: Column,
    stats: Vec<(&'static str, Column)>,
    resists: Vec<(&'static str, Column)>,
}

impl GearColumns {
    fn resolve(table: &Table) -> Result<Self, CatalogError> {
        let schema = table.schema(TableKind::Gear);
        Ok(Self {
            summary: schema.first(),
            name: schema.required("Name", &["Name.1", "Name"])?,
            rarity: schema.required("Rarity", &["Rarity"])?,
            gear_type: schema.required("Gear Type", &["Gear Type"])?,
            slot_type: schema.required("Slot Type", &["Slot Type"])?,
            faction: schema.optional(&["Faction"]),
            gold_cost: schema.optional(&["Gold Cost", "Gold"]),
            ammo_requirement: schema.optional(&["Ammo Requirement"]),
            weapon_group: schema.optional(&["Weapon Group"]),
            // Only columns the sheet actually has end up on items.
            stats: stats::ALL
                .iter()
                .map(|&s| (s, schema.optional(&[s])))
                .filter(|(_, c)| c.is_present())
                .collect(),
            resists: resists::ALL
                .iter()
                .map(|&r| (r, resolve(&schema, gear_resist_variants(r))))
                .filter(|(_, c)| c.is_present())
                .collect(),
        })
    }
}

fn bonuses(
    columns: &[(&'static str, Column)],
    row: &[Cell],
    coerce: fn(&Cell, f64) -> f64,
) -> BTreeMap<String, f64> {
    columns
        .iter()
        .map(|(name, col)| (name.to_string(), coerce(col.cell(row), 0.0)))
        .collect()
}

/// Build the gear catalog. Item ids are row indices.
///
/// Rows without a usable name and rows whose name is a placeholder are skipped.
pub fn load_gear(table: &Table) -> Result<GearCatalog, CatalogError> {
    let cols = GearColumns::resolve(table)?;
    let mut catalog = GearCatalog::default();
    let mut skipped = 0usize;

    for (idx, row) in table.rows.iter().enumerate() {
        let name = cols.name.text_or_empty(row);
        if !has_usable_name(&name) || is_placeholder_name(&name) {
            log::debug!("gear row {} skipped: unusable name {:?}", idx, name);
            skipped += 1;
            continue;
        }

        let rarity_text = cols.rarity.text_or_empty(row);
        let rarity = Rarity::parse_cell(&rarity_text);
        if rarity.is_none() {
            log::debug!("gear row {} ({}) has unknown rarity {:?}", idx, name, rarity_text);
        }

        catalog.insert(GearItem {
            id: idx,
            name,
            rarity,
            gear_type: cols.gear_type.text_or_empty(row),
            slot_type: cols.slot_type.text_or_empty(row),
            faction: cols.faction.text_or_empty(row),
            stats: bonuses(&cols.stats, row, cells::number),
            resists: bonuses(&cols.resists, row, cells::percent),
            gold_cost: cells::gold_cost(cols.gold_cost.cell(row)),
            ammo_requirement: cols.ammo_requirement.text(row),
            weapon_group: cols.weapon_group.text(row),
            summary: cols.summary.text_or_empty(row),
        });
    }

    log::info!("Loaded {} gear items ({} rows skipped)", catalog.len(), skipped);
    Ok(catalog)
}

/// Parse and load a race table from its JSON export.
pub fn races_from_json(json: &str) -> Result<RaceCatalog, CatalogError> {
    load_races(&Table::from_json(json)?)
}

/// Parse and load a gear table from its JSON export.
pub fn gear_from_json(json: &str) -> Result<GearCatalog, CatalogError> {
    load_gear(&Table::from_json(json)?)
}
