//! Gear allocation: budget-bounded, rule-checked random loadouts.
//!
//! Budget = cost of the rank's required rarity + the rank's extra gold.
//! Spending happens in a fixed order, each step drawing from the same RNG:
//!
//! 1. Mandatory item of the required rarity (weapon preferred), always
//!    charged at the required rarity's cost.
//! 2. A weapon, if the mandatory item was not one.
//! 3. Ammunition of the kind the weapon consumes.
//! 4. Random fill with compatible extras until the budget or the candidate
//!    list runs out.
//!
//! Ammunition is never bought except in step 3, so every ammo item in a
//! loadout has a weapon that fires it.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{GearCatalog, GearItem};
use crate::gear::{
    ammo_kind_of_item, can_add_weapon, is_ammunition, is_eligible, is_weapon, weapon_ammo_kind,
};
use crate::rank::Rank;
use crate::rarity::Rarity;
use crate::select::pick;

/// Result of one allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearAllocation {
    /// Chosen items in purchase order; the mandatory item is first.
    pub gear: Vec<GearItem>,
    /// Total gold the rank allowed.
    pub budget: u32,
    /// Gold left unspent.
    pub remaining: u32,
}

/// Eligible items split into disjoint pools, each in catalog order.
struct Pools<'a> {
    ammo: Vec<&'a GearItem>,
    weapons: Vec<&'a GearItem>,
    others: Vec<&'a GearItem>,
}

impl<'a> Pools<'a> {
    fn partition(eligible: &[&'a GearItem]) -> Self {
        let mut pools = Pools {
            ammo: Vec::new(),
            weapons: Vec::new(),
            others: Vec::new(),
        };
        for &g in eligible {
            if is_ammunition(g) {
                pools.ammo.push(g);
            } else if is_weapon(g) {
                pools.weapons.push(g);
            } else {
                pools.others.push(g);
            }
        }
        pools
    }

    /// Weapons followed by others: everything that is not ammunition.
    fn non_ammo(&self) -> impl Iterator<Item = &'a GearItem> + '_ {
        self.weapons.iter().chain(self.others.iter()).copied()
    }
}

/// Step 1: weapon of the required rarity, else any item of it, else anything.
fn pick_mandatory<'a, R: Rng + ?Sized>(
    pools: &Pools<'a>,
    required: Rarity,
    rng: &mut R,
) -> Option<&'a GearItem> {
    let of_rarity = |pool: &[&'a GearItem]| -> Vec<&'a GearItem> {
        pool.iter()
            .copied()
            .filter(|g| g.rarity == Some(required))
            .collect()
    };

    let weapons = of_rarity(&pools.weapons);
    if !weapons.is_empty() {
        return pick(&weapons, rng);
    }
    let others = of_rarity(&pools.others);
    if !others.is_empty() {
        return pick(&others, rng);
    }

    log::debug!("no eligible {} item, falling back to any rarity", required);
    let fallback: Vec<&GearItem> = pools.non_ammo().collect();
    pick(&fallback, rng)
}

/// Select a loadout for `rank` from items usable by `faction`.
///
/// An empty eligible pool yields an empty loadout rather than an error.
pub fn allocate_gear<R: Rng + ?Sized>(
    rank: Rank,
    faction: &str,
    catalog: &GearCatalog,
    rng: &mut R,
) -> GearAllocation {
    let required = rank.required_rarity();
    let budget = rank.budget();
    let nothing = GearAllocation {
        gear: Vec::new(),
        budget,
        remaining: budget,
    };

    let eligible: Vec<&GearItem> = catalog
        .items()
        .filter(|g| is_eligible(g, faction))
        .collect();
    if eligible.is_empty() {
        log::debug!("no gear eligible for faction {:?}", faction);
        return nothing;
    }

    let pools = Pools::partition(&eligible);

    let Some(mandatory) = pick_mandatory(&pools, required, rng) else {
        log::debug!("only ammunition eligible for faction {:?}", faction);
        return nothing;
    };

    // The guarantee costs the rank rarity, whatever the item's own rarity is.
    let mut remaining = budget.saturating_sub(required.cost());
    let mut chosen: Vec<&GearItem> = vec![mandatory];
    let mut main_weapon = is_weapon(mandatory).then_some(mandatory);
    log::debug!(
        "{}: budget {}, mandatory {:?} ({:?})",
        rank,
        budget,
        mandatory.name,
        mandatory.rarity
    );

    // Step 2: make sure there is a weapon.
    if main_weapon.is_none() {
        let affordable: Vec<&GearItem> = pools
            .weapons
            .iter()
            .copied()
            .filter(|w| w.id != mandatory.id && w.cost() <= remaining)
            .collect();
        if let Some(w) = pick(&affordable, rng) {
            remaining -= w.cost();
            chosen.push(w);
            main_weapon = Some(w);
        }
    }

    // Step 3: feed the weapon.
    if let Some(kind) = main_weapon.and_then(weapon_ammo_kind) {
        let affordable: Vec<&GearItem> = pools
            .ammo
            .iter()
            .copied()
            .filter(|a| ammo_kind_of_item(a) == Some(kind) && a.cost() <= remaining)
            .collect();
        match pick(&affordable, rng) {
            Some(a) => {
                remaining -= a.cost();
                chosen.push(a);
            }
            None => log::debug!("no affordable {:?} ammunition", kind),
        }
    }

    // Step 4: random fill.
    let mut taken: HashSet<usize> = chosen.iter().map(|g| g.id).collect();
    let min_cost = Rarity::min_cost();
    while remaining >= min_cost {
        let held: Vec<&GearItem> = chosen.iter().copied().filter(|g| is_weapon(g)).collect();
        let candidates: Vec<&GearItem> = pools
            .non_ammo()
            .filter(|g| !taken.contains(&g.id))
            .filter(|g| g.cost() > 0 && g.cost() <= remaining)
            .filter(|g| !is_weapon(g) || can_add_weapon(&held, g))
            .collect();

        let Some(item) = pick(&candidates, rng) else {
            log::debug!("fill stopped with {} gold: no compatible candidates", remaining);
            break;
        };
        remaining -= item.cost();
        taken.insert(item.id);
        chosen.push(item);
    }

    GearAllocation {
        gear: chosen.into_iter().cloned().collect(),
        budget,
        remaining,
    }
}

/// Select a loadout and return only the items.
pub fn allocate<R: Rng + ?Sized>(
    rank: Rank,
    faction: &str,
    catalog: &GearCatalog,
    rng: &mut R,
) -> Vec<GearItem> {
    allocate_gear(rank, faction, catalog, rng).gear
}
