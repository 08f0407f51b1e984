//! Integration tests for the full generation pipeline.
//!
//! Exercises: race/gear tables → catalogs → GearAllocation → CombinedStats
//! → GeneratedSentient, against the sheets bundled in `data/`.
//!
//! All tests are pure logic with seeded RNGs.

use rand::rngs::StdRng;
use rand::SeedableRng;

use sentient_logic::allocator::{allocate, allocate_gear};
use sentient_logic::catalog::{gear_from_json, load_gear, load_races, races_from_json};
use sentient_logic::cells::Cell;
use sentient_logic::constants::FACTIONS;
use sentient_logic::gear::{
    ammo_kind_of_item, handedness, is_ammunition, is_artifact, is_weapon, matches_faction,
    weapon_ammo_kind, Handedness,
};
use sentient_logic::sentient::{generate, SentientForge};
use sentient_logic::stats::combine;
use sentient_logic::table::Table;
use sentient_logic::{GearCatalog, GearItem, GeneratedSentient, RaceCatalog, Rank, Rarity};

const RACES_JSON: &str = include_str!("../../../data/races.json");
const GEAR_JSON: &str = include_str!("../../../data/gear.json");

// ── Helpers ────────────────────────────────────────────────────────────

fn bundled() -> (RaceCatalog, GearCatalog) {
    (
        races_from_json(RACES_JSON).unwrap(),
        gear_from_json(GEAR_JSON).unwrap(),
    )
}

fn item(id: usize, name: &str, rarity: Rarity, gear_type: &str, slot_type: &str) -> GearItem {
    GearItem {
        id,
        name: name.to_string(),
        rarity: Some(rarity),
        gear_type: gear_type.to_string(),
        slot_type: slot_type.to_string(),
        faction: "Any".to_string(),
        ..GearItem::default()
    }
}

/// Every generated sentient across all ranks for a range of seeds.
fn sweep(seeds: std::ops::Range<u64>) -> Vec<GeneratedSentient> {
    let (races, gear) = bundled();
    let mut out = Vec::new();
    for &rank in Rank::all() {
        for seed in seeds.clone() {
            let mut rng = StdRng::seed_from_u64(seed);
            out.push(generate(rank, &races, &gear, &mut rng).unwrap());
        }
    }
    out
}

// ── Catalog loading ────────────────────────────────────────────────────

#[test]
fn bundled_catalogs_load() {
    let (races, gear) = bundled();
    assert_eq!(races.len(), 8);
    // Placeholder and nameless rows are dropped at load.
    assert_eq!(gear.len(), 30);
    assert!(gear.items().all(|g| g.name != "Insert Weapon Here"));
}

#[test]
fn bundled_races_normalize_headers_and_kin() {
    let (races, _) = bundled();
    let marsh = races.get("Human:Marsh-born").unwrap();
    assert_eq!(marsh.kin, "Mortal");
    assert!((marsh.resists["Frost"] + 0.1).abs() < 1e-12);
    assert!((marsh.resists["Poison"] - 0.3).abs() < 1e-12);

    let revenant = races.get("Revenant:Hollow").unwrap();
    assert_eq!(revenant.resists["Light"], -1.0);
    assert_eq!(revenant.resists["Dark"], 1.0);
    assert_eq!(revenant.base_stats["Fortitude"], 0.0);
}

#[test]
fn bundled_gear_prefers_second_name_column() {
    let (_, gear) = bundled();
    let whetstone = gear.items().find(|g| g.name == "Whetstone").unwrap();
    assert_eq!(whetstone.rarity, Some(Rarity::Common));
    assert_eq!(whetstone.gold_cost, 200);
    assert_eq!(whetstone.summary, "Old sheet name retained.");
}

#[test]
fn percent_and_fraction_cells_load_identically() {
    let columns = vec![
        "RACES".to_string(),
        "SUBTYPES".to_string(),
        "FIRE Resistance\u{a0}\u{a0}".to_string(),
    ];
    let table = Table::new(
        columns,
        vec![
            vec![Cell::Text("Elf".into()), Cell::Text("High".into()), Cell::Text("20%".into())],
            vec![Cell::Text("Elf".into()), Cell::Text("Wood".into()), Cell::Text("0.2".into())],
        ],
    );
    let races = load_races(&table).unwrap();
    let high = races.get("Elf:High").unwrap().resists["Fire"];
    let wood = races.get("Elf:Wood").unwrap().resists["Fire"];
    assert_eq!(high, 0.2);
    assert_eq!(wood, 0.2);
}

#[test]
fn missing_required_gear_column_is_fatal() {
    let table = Table::new(vec!["Name".into(), "Slot Type".into()], vec![]);
    assert!(load_gear(&table).is_err());
}

// ── Invariants over many seeds ─────────────────────────────────────────

#[test]
fn resistances_always_clamped() {
    for s in sweep(0..40) {
        for (channel, v) in &s.resists {
            assert!((-1.0..=1.0).contains(v), "{} = {} on {}", channel, v, s.name);
        }
    }
}

#[test]
fn weapon_handedness_rules_hold() {
    for s in sweep(0..40) {
        let weapons: Vec<&GearItem> = s.gear.iter().filter(|g| is_weapon(g)).collect();
        assert!(weapons.len() <= 2);
        if weapons.len() == 2 {
            // Slots naming neither hand pair like one-handed weapons.
            for w in &weapons {
                assert_ne!(handedness(w), Handedness::TwoHanded, "{:?}", s.gear);
            }
        }
    }
}

#[test]
fn ammunition_always_has_a_matching_weapon() {
    for s in sweep(0..40) {
        for ammo in s.gear.iter().filter(|g| is_ammunition(g)) {
            let kind = ammo_kind_of_item(ammo);
            assert!(kind.is_some());
            assert!(
                s.gear.iter().any(|w| weapon_ammo_kind(w) == kind),
                "{} has no weapon for it",
                ammo.name
            );
        }
    }
}

#[test]
fn loadouts_respect_faction_and_artifact_bans() {
    for s in sweep(0..40) {
        assert!(FACTIONS.contains(&s.faction.as_str()));
        for g in &s.gear {
            assert!(!is_artifact(g), "{}", g.name);
            assert!(matches_faction(g, &s.faction), "{} for {}", g.name, s.faction);
        }
    }
}

#[test]
fn mandatory_item_matches_rank_rarity() {
    // Every rarity has an unrestricted weapon in the bundled sheet.
    for s in sweep(0..20) {
        let first = &s.gear[0];
        assert_eq!(first.rarity, Some(s.rank.required_rarity()));
        assert!(is_weapon(first));
    }
}

#[test]
fn spending_never_exceeds_budget() {
    let (_, gear) = bundled();
    for &rank in Rank::all() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = allocate_gear(rank, "Legion", &gear, &mut rng);
            let extras: u32 = out.gear[1..].iter().map(|g| g.cost()).sum();
            assert_eq!(rank.required_rarity().cost() + extras + out.remaining, out.budget);
            assert!(out.remaining <= rank.extra_gold());
        }
    }
}

#[test]
fn stats_match_aggregation_of_chosen_gear() {
    for s in sweep(0..10) {
        let combined = combine(&s.race, &s.gear);
        assert_eq!(combined.stats, s.stats);
        assert_eq!(combined.resists, s.resists);
        assert_eq!(combine(&s.race, &s.gear), combined);
    }
}

// ── Reproducibility ────────────────────────────────────────────────────

#[test]
fn seeded_generation_is_reproducible() {
    let forge = SentientForge::from_json(RACES_JSON, GEAR_JSON).unwrap();
    for &rank in Rank::all() {
        let a = forge.generate(rank, &mut StdRng::seed_from_u64(2024)).unwrap();
        let b = forge.generate(rank, &mut StdRng::seed_from_u64(2024)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn different_seeds_vary() {
    let forge = SentientForge::from_json(RACES_JSON, GEAR_JSON).unwrap();
    let keys: std::collections::HashSet<String> = (0..50)
        .map(|seed| {
            let s = forge
                .generate(Rank::Elite, &mut StdRng::seed_from_u64(seed))
                .unwrap();
            format!("{}|{}|{}", s.race_key, s.faction, s.name)
        })
        .collect();
    assert!(keys.len() > 5);
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn weakling_dagger_and_cloak_exhaust_budget() {
    let gear: GearCatalog = vec![
        item(0, "Dagger", Rarity::Common, "Weapon", "One-Handed"),
        item(1, "Cloak", Rarity::Common, "Armor", "Back"),
    ]
    .into_iter()
    .collect();
    let mut rng = StdRng::seed_from_u64(0);
    let out = allocate_gear(Rank::Weakling, "Bandit", &gear, &mut rng);
    let names: Vec<&str> = out.gear.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Dagger", "Cloak"]);
    assert_eq!(out.budget, 400);
    assert_eq!(out.remaining, 0);
}

#[test]
fn guardian_without_mythic_falls_back_at_mythic_price() {
    let gear: GearCatalog = vec![
        item(0, "Spear", Rarity::Uncommon, "Weapon", "Two-Handed"),
        item(1, "Sunstone", Rarity::Legendary, "Accessory", "Neck"),
        item(2, "Ring", Rarity::Common, "Accessory", "Ring"),
    ]
    .into_iter()
    .collect();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = allocate_gear(Rank::Guardian, "Conclave", &gear, &mut rng);
        assert_ne!(out.gear[0].rarity, Some(Rarity::Mythic));
        let after_mandatory: u32 = out.gear[1..].iter().map(|g| g.cost()).sum();
        assert_eq!(after_mandatory + out.remaining, 1000);
    }
}

#[test]
fn quiver_weapon_buys_quiver_before_extras() {
    // The bow is the only Uncommon item, so it is always the mandatory pick.
    let mut bow = item(0, "Recurve", Rarity::Uncommon, "Weapon", "Two-Handed");
    bow.ammo_requirement = Some("Quiver of Holding".into());
    let gear: GearCatalog = vec![
        bow,
        item(1, "Boots", Rarity::Common, "Armor", "Feet"),
        item(2, "Gloves", Rarity::Common, "Armor", "Hands"),
        item(3, "Arrow Quiver", Rarity::Common, "Ammunition", "Ammunition Slot"),
        item(4, "Shot Bag", Rarity::Common, "Ammunition", "Ammunition Slot"),
    ]
    .into_iter()
    .collect();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = allocate_gear(Rank::PrimeWeakling, "Bandit", &gear, &mut rng);
        // 600 budget: 400 for the bow, the remaining 200 goes to the quiver.
        let names: Vec<&str> = out.gear.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Recurve", "Arrow Quiver"], "seed {}", seed);
        assert_eq!(out.remaining, 0);
    }
}

#[test]
fn quiver_precedes_fill_when_gold_remains() {
    let mut bow = item(0, "Recurve", Rarity::Uncommon, "Weapon", "Two-Handed");
    bow.ammo_requirement = Some("Quiver".into());
    let gear: GearCatalog = vec![
        bow,
        item(1, "Boots", Rarity::Common, "Armor", "Feet"),
        item(2, "Gloves", Rarity::Common, "Armor", "Hands"),
        item(3, "Arrow Quiver", Rarity::Common, "Ammunition", "Ammunition Slot"),
    ]
    .into_iter()
    .collect();
    for seed in 0..20 {
        let chosen = allocate(Rank::Boss, "Legion", &gear, &mut StdRng::seed_from_u64(seed));
        // No Epic gear: whether the bow is the fallback item or the step-two
        // weapon, it is always bought and the quiver comes right after it.
        let bow = chosen.iter().position(|g| g.name == "Recurve").unwrap();
        assert_eq!(chosen[bow + 1].name, "Arrow Quiver", "seed {}", seed);
        assert!(chosen.iter().filter(|g| is_ammunition(g)).count() <= 1);
    }
}

#[test]
fn empty_faction_pool_yields_naked_sentient() {
    let (races, _) = bundled();
    let mut only_legion = item(0, "Legion Pike", Rarity::Common, "Weapon", "Two-Handed");
    only_legion.faction = "Legion".into();
    let gear: GearCatalog = vec![only_legion].into_iter().collect();

    let mut saw_naked = false;
    for seed in 0..30 {
        let s = generate(Rank::Boss, &races, &gear, &mut StdRng::seed_from_u64(seed)).unwrap();
        if s.faction != "Legion" {
            assert!(s.gear.is_empty());
            assert_eq!(s.stats, s.race.base_stats);
            saw_naked = true;
        }
    }
    assert!(saw_naked);
}
