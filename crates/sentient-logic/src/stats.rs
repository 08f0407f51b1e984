//! Pure stat aggregation of race base values and gear bonuses.
//!
//! Everything is additive. Resistances are clamped to \[-1.0, 1.0\] after
//! summing: no more than full mitigation, no worse than double damage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{GearItem, RaceTemplate};
use crate::constants::resists;

/// Final stat block for a race wearing a set of gear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedStats {
    /// `"Race:Subtype"` of the template the block was built from.
    pub race_key: String,
    /// Ids of the gear items that contributed.
    pub gear_ids: Vec<usize>,
    pub stats: BTreeMap<String, f64>,
    /// Clamped decimal resistances.
    pub resists: BTreeMap<String, f64>,
}

fn add_all(into: &mut BTreeMap<String, f64>, bonuses: &BTreeMap<String, f64>) {
    for (k, v) in bonuses {
        *into.entry(k.clone()).or_insert(0.0) += v;
    }
}

pub fn clamp_resist(value: f64) -> f64 {
    value.clamp(resists::MIN, resists::MAX)
}

/// Combine a race template with chosen gear.
///
/// Every stat named by the race or any item appears in the output; missing
/// values count as 0.
pub fn combine(race: &RaceTemplate, gear: &[GearItem]) -> CombinedStats {
    let mut stats = race.base_stats.clone();
    let mut totals = race.resists.clone();

    for item in gear {
        add_all(&mut stats, &item.stats);
        add_all(&mut totals, &item.resists);
    }

    for v in totals.values_mut() {
        *v = clamp_resist(*v);
    }

    CombinedStats {
        race_key: race.key(),
        gear_ids: gear.iter().map(|g| g.id).collect(),
        stats,
        resists: totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn race() -> RaceTemplate {
        RaceTemplate {
            race: "Orc".into(),
            subtype: "Ash".into(),
            base_stats: map(&[("Health", 100.0), ("Strength", 10.0)]),
            resists: map(&[("Fire", 0.5), ("Frost", -0.2)]),
            ..RaceTemplate::default()
        }
    }

    fn gear(id: usize, stats: &[(&str, f64)], resists: &[(&str, f64)]) -> GearItem {
        GearItem {
            id,
            name: format!("item{}", id),
            stats: map(stats),
            resists: map(resists),
            ..GearItem::default()
        }
    }

    #[test]
    fn test_no_gear_returns_race_values() {
        let r = race();
        let out = combine(&r, &[]);
        assert_eq!(out.stats, r.base_stats);
        assert_eq!(out.resists, r.resists);
        assert_eq!(out.race_key, "Orc:Ash");
        assert!(out.gear_ids.is_empty());
    }

    #[test]
    fn test_stats_are_additive() {
        let items = vec![
            gear(1, &[("Health", 20.0), ("Might", 3.0)], &[]),
            gear(2, &[("Health", 5.0), ("Strength", -2.0)], &[]),
        ];
        let out = combine(&race(), &items);
        assert_eq!(out.stats["Health"], 125.0);
        assert_eq!(out.stats["Strength"], 8.0);
        assert_eq!(out.stats["Might"], 3.0);
        assert_eq!(out.gear_ids, vec![1, 2]);
    }

    #[test]
    fn test_resists_clamped() {
        let items = vec![
            gear(1, &[], &[("Fire", 0.4), ("Frost", -0.9)]),
            gear(2, &[], &[("Fire", 0.4), ("Poison", 0.3)]),
        ];
        let out = combine(&race(), &items);
        assert_eq!(out.resists["Fire"], 1.0);
        assert_eq!(out.resists["Frost"], -1.0);
        assert!((out.resists["Poison"] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_race_value_is_clamped() {
        let mut r = race();
        r.resists.insert("Dark".into(), 1.5);
        let out = combine(&r, &[]);
        assert_eq!(out.resists["Dark"], 1.0);
    }

    #[test]
    fn test_combine_is_deterministic() {
        let items = vec![gear(1, &[("Health", 0.1)], &[("Fire", 0.1)])];
        let r = race();
        assert_eq!(combine(&r, &items), combine(&r, &items));
    }
}
