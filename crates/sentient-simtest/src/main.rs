//! Sentient Headless Generation Harness
//!
//! Loads the race and gear sheets, generates sentients for every rank over
//! a range of seeds and checks the loadout invariants on each one.
//! Runs entirely in-process with seeded RNGs.
//!
//! Usage:
//!   cargo run -p sentient-simtest
//!   cargo run -p sentient-simtest -- --verbose
//!   cargo run -p sentient-simtest -- --rank guardian --runs 1000 --seed 7
//!   cargo run -p sentient-simtest -- --show --rank "Prime Boss"
//!
//! Set `RUST_LOG=sentient_logic=debug` to trace individual allocations.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sentient_logic::constants::{resists, FACTIONS};
use sentient_logic::gear::{
    ammo_kind_of_item, handedness, is_ammunition, is_artifact, is_placeholder_name, is_weapon,
    matches_faction, weapon_ammo_kind, Handedness,
};
use sentient_logic::{combine, GeneratedSentient, Rank, SentientForge};

// ── Bundled sheets (same exports the integration tests use) ─────────────
const RACES_JSON: &str = include_str!("../../../data/races.json");
const GEAR_JSON: &str = include_str!("../../../data/gear.json");

const DEFAULT_SEED: u64 = 42;
const DEFAULT_RUNS: u64 = 200;

// ── Configuration ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
struct HarnessConfig {
    verbose: bool,
    seed: u64,
    runs: u64,
    rank: Option<Rank>,
    show: bool,
    races_path: Option<String>,
    gear_path: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            seed: DEFAULT_SEED,
            runs: DEFAULT_RUNS,
            rank: None,
            show: false,
            races_path: None,
            gear_path: None,
        }
    }
}

impl HarnessConfig {
    /// Parse flags (program name already stripped).
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--verbose" | "-v" => config.verbose = true,
                "--show" => config.show = true,
                "--seed" => config.seed = parse_number(&arg, args.next())?,
                "--runs" => config.runs = parse_number(&arg, args.next())?,
                "--rank" => {
                    let name = value_of(&arg, args.next())?;
                    let rank = name.parse::<Rank>().map_err(|e| e.to_string())?;
                    config.rank = Some(rank);
                }
                "--races" => config.races_path = Some(value_of(&arg, args.next())?),
                "--gear" => config.gear_path = Some(value_of(&arg, args.next())?),
                other => return Err(format!("unknown argument '{}'", other)),
            }
        }

        if config.runs == 0 {
            return Err("--runs must be at least 1".into());
        }
        Ok(config)
    }

    fn ranks(&self) -> Vec<Rank> {
        match self.rank {
            Some(rank) => vec![rank],
            None => Rank::all().to_vec(),
        }
    }
}

fn value_of(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{} expects a value", flag))
}

fn parse_number(flag: &str, value: Option<String>) -> Result<u64, String> {
    let raw = value_of(flag, value)?;
    raw.parse()
        .map_err(|_| format!("{} expects a non-negative integer, got '{}'", flag, raw))
}

fn read_sheet(path: Option<&str>, bundled: &'static str) -> Result<String, String> {
    match path {
        Some(p) => std::fs::read_to_string(p).map_err(|e| format!("cannot read {}: {}", p, e)),
        None => Ok(bundled.to_string()),
    }
}

fn load_forge(config: &HarnessConfig) -> Result<SentientForge, String> {
    let races = read_sheet(config.races_path.as_deref(), RACES_JSON)?;
    let gear = read_sheet(config.gear_path.as_deref(), GEAR_JSON)?;
    SentientForge::from_json(&races, &gear).map_err(|e| e.to_string())
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    env_logger::init();

    let config = match HarnessConfig::parse(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let forge = match load_forge(&config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if config.show {
        std::process::exit(show_one(&forge, &config));
    }

    println!("=== Sentient Generation Harness ===\n");
    let verbose = config.verbose;
    let mut results = Vec::new();

    // 1. Catalog contents
    results.extend(validate_catalogs(&forge, verbose));

    // 2. Loadout invariants over the seed sweep
    results.extend(validate_generation_sweep(&forge, &config));

    // 3. Determinism
    results.extend(validate_reproducibility(&forge, &config));

    // 4. Rank names
    results.extend(validate_rank_names(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

/// Print one sentient as JSON. Returns the process exit code.
fn show_one(forge: &SentientForge, config: &HarnessConfig) -> i32 {
    let rank = config.rank.unwrap_or(Rank::Weakling);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let sentient = match forge.generate(rank, &mut rng) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            return 1;
        }
    };
    match serde_json::to_string_pretty(&sentient) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    }
}

// ── 1. Catalogs ─────────────────────────────────────────────────────────

fn validate_catalogs(forge: &SentientForge, verbose: bool) -> Vec<TestResult> {
    println!("--- Catalogs ---");
    let mut results = Vec::new();
    let races = forge.races();
    let gear = forge.gear();

    results.push(TestResult {
        name: "races_not_empty".into(),
        passed: !races.is_empty(),
        detail: format!("{} race templates loaded", races.len()),
    });

    results.push(TestResult {
        name: "gear_not_empty".into(),
        passed: !gear.is_empty(),
        detail: format!("{} gear items loaded", gear.len()),
    });

    let out_of_range: Vec<String> = races
        .templates()
        .iter()
        .flat_map(|r| {
            r.resists
                .iter()
                .filter(|(_, v)| **v < resists::MIN || **v > resists::MAX)
                .map(move |(k, v)| format!("{} {}={}", r.key(), k, v))
        })
        .collect();
    results.push(TestResult {
        name: "race_resists_in_range".into(),
        passed: out_of_range.is_empty(),
        detail: if out_of_range.is_empty() {
            "all race resistances within [-1, 1]".into()
        } else {
            format!("out of range: {}", out_of_range.join(", "))
        },
    });

    let placeholders: Vec<&str> = gear
        .items()
        .filter(|g| is_placeholder_name(&g.name))
        .map(|g| g.name.as_str())
        .collect();
    results.push(TestResult {
        name: "gear_no_placeholders".into(),
        passed: placeholders.is_empty(),
        detail: if placeholders.is_empty() {
            "no placeholder rows survived loading".into()
        } else {
            format!("placeholders: {}", placeholders.join(", "))
        },
    });

    // Per-rarity supply: a rank whose rarity has no weapon always relies on fallback.
    for &rank in Rank::all() {
        let rarity = rank.required_rarity();
        let weapons = gear
            .items()
            .filter(|g| is_weapon(g) && g.rarity == Some(rarity) && !is_artifact(g))
            .count();
        if verbose {
            println!("  {:<13} {:<10} {} weapons", rank.display_name(), rarity, weapons);
        }
    }

    results
}

// ── 2. Generation sweep ─────────────────────────────────────────────────

/// Every invariant violation found on one sentient.
fn violations(s: &GeneratedSentient) -> Vec<String> {
    let mut found = Vec::new();

    for (channel, v) in &s.resists {
        if !(resists::MIN..=resists::MAX).contains(v) {
            found.push(format!("{} resist {} out of range", channel, v));
        }
    }

    let weapons: Vec<_> = s.gear.iter().filter(|g| is_weapon(g)).collect();
    if weapons.len() > 2 {
        found.push(format!("{} weapons", weapons.len()));
    }
    if weapons.len() == 2 && weapons.iter().any(|w| handedness(w) == Handedness::TwoHanded) {
        found.push("two-handed weapon paired with another".into());
    }

    for ammo in s.gear.iter().filter(|g| is_ammunition(g)) {
        let kind = ammo_kind_of_item(ammo);
        if kind.is_none() || !s.gear.iter().any(|w| weapon_ammo_kind(w) == kind) {
            found.push(format!("{} has no matching weapon", ammo.name));
        }
    }

    let mut ids = HashSet::new();
    for g in &s.gear {
        if !ids.insert(g.id) {
            found.push(format!("{} chosen twice", g.name));
        }
        if is_artifact(g) {
            found.push(format!("artifact {} chosen", g.name));
        }
        if !matches_faction(g, &s.faction) {
            found.push(format!("{} not usable by {}", g.name, s.faction));
        }
    }

    if !s.gear.is_empty() {
        let spent = s.rank.required_rarity().cost()
            + s.gear[1..].iter().map(|g| g.cost()).sum::<u32>();
        if spent > s.rank.budget() {
            found.push(format!("spent {} of {}", spent, s.rank.budget()));
        }
    }

    if !FACTIONS.contains(&s.faction.as_str()) {
        found.push(format!("unknown faction {}", s.faction));
    }

    let again = combine(&s.race, &s.gear);
    if again.stats != s.stats || again.resists != s.resists {
        found.push("stats differ from a fresh aggregation".into());
    }

    found
}

fn validate_generation_sweep(forge: &SentientForge, config: &HarnessConfig) -> Vec<TestResult> {
    println!("--- Generation Sweep ---");
    let mut results = Vec::new();

    for rank in config.ranks() {
        let mut failures = Vec::new();
        let mut naked = 0u64;
        let mut items = 0usize;
        let mut on_rarity = 0u64;

        for i in 0..config.runs {
            let seed = config.seed.wrapping_add(i);
            let mut rng = StdRng::seed_from_u64(seed);
            match forge.generate(rank, &mut rng) {
                Ok(s) => {
                    if s.gear.is_empty() {
                        naked += 1;
                    } else if s.gear[0].rarity == Some(rank.required_rarity()) {
                        on_rarity += 1;
                    }
                    items += s.gear.len();
                    for v in violations(&s) {
                        failures.push(format!("seed {}: {}", seed, v));
                    }
                }
                Err(e) => failures.push(format!("seed {}: {}", seed, e)),
            }
        }

        if config.verbose {
            println!(
                "  {:<13} avg {:.1} items, {} naked, {}/{} mandatory on rarity",
                rank.display_name(),
                items as f64 / config.runs as f64,
                naked,
                on_rarity,
                config.runs
            );
        }

        results.push(TestResult {
            name: format!("sweep_{}", rank.display_name().to_lowercase().replace(' ', "_")),
            passed: failures.is_empty(),
            detail: if failures.is_empty() {
                format!("{} sentients, all invariants hold", config.runs)
            } else {
                format!(
                    "{} violations, first: {}",
                    failures.len(),
                    failures.first().map(String::as_str).unwrap_or_default()
                )
            },
        });
    }

    results
}

// ── 3. Reproducibility ──────────────────────────────────────────────────

fn validate_reproducibility(forge: &SentientForge, config: &HarnessConfig) -> Vec<TestResult> {
    println!("--- Reproducibility ---");
    let mut mismatched = Vec::new();

    for rank in config.ranks() {
        let a = forge.generate(rank, &mut StdRng::seed_from_u64(config.seed));
        let b = forge.generate(rank, &mut StdRng::seed_from_u64(config.seed));
        match (a, b) {
            (Ok(a), Ok(b)) if a == b => {}
            _ => mismatched.push(rank.display_name()),
        }
    }

    vec![TestResult {
        name: "seeded_reproducible".into(),
        passed: mismatched.is_empty(),
        detail: if mismatched.is_empty() {
            format!("seed {} reproduces every rank", config.seed)
        } else {
            format!("differs for: {}", mismatched.join(", "))
        },
    }]
}

// ── 4. Rank names ───────────────────────────────────────────────────────

fn validate_rank_names(verbose: bool) -> Vec<TestResult> {
    println!("--- Rank Names ---");
    let broken: Vec<&str> = Rank::all()
        .iter()
        .filter(|r| r.display_name().parse::<Rank>().ok() != Some(**r))
        .map(|r| r.display_name())
        .collect();

    if verbose {
        for r in Rank::all() {
            println!(
                "  {:<13} budget {:>5}, requires {}",
                r.display_name(),
                r.budget(),
                r.required_rarity()
            );
        }
    }

    vec![TestResult {
        name: "rank_names_parse".into(),
        passed: broken.is_empty(),
        detail: if broken.is_empty() {
            "every display name parses back".into()
        } else {
            format!("unparseable: {}", broken.join(", "))
        },
    }]
}
