//! Gear classification predicates.
//!
//! Everything the allocator knows about an item beyond its rarity comes from
//! free-text sheet columns, so these are string-matching heuristics. They are
//! kept as small named functions so each rule can be tested on its own.

use serde::{Deserialize, Serialize};

use crate::catalog::GearItem;
use crate::constants::{ANY_FACTION, NAN_LITERAL, PLACEHOLDER_MARKER};

/// How many hands a weapon occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    OneHanded,
    TwoHanded,
    /// Slot text names neither; treated as single-hand when dual wielding.
    Unspecified,
}

/// Ammunition families linking ammo items to the weapons that fire them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoKind {
    Quiver,
    Pouch,
}

const POUCH_WORDS: [&str; 3] = ["pouch", "sack", "bag"];

/// Quiver/pouch classification of a piece of free text.
fn ammo_kind_in(text: &str) -> Option<AmmoKind> {
    let s = text.to_lowercase();
    if s.contains("quiver") {
        Some(AmmoKind::Quiver)
    } else if POUCH_WORDS.iter().any(|w| s.contains(w)) {
        Some(AmmoKind::Pouch)
    } else {
        None
    }
}

/// Non-empty and not a spreadsheet `nan`.
pub fn has_usable_name(name: &str) -> bool {
    let s = name.trim();
    !s.is_empty() && !s.eq_ignore_ascii_case(NAN_LITERAL)
}

/// Unfinished rows carry an "Insert ..." marker in their name.
pub fn is_placeholder_name(name: &str) -> bool {
    name.to_lowercase().contains(PLACEHOLDER_MARKER)
}

/// Artifacts never go to sentients. Flagged by gear type, slot type or name.
pub fn is_artifact(item: &GearItem) -> bool {
    [&item.gear_type, &item.slot_type, &item.name]
        .iter()
        .any(|s| s.to_lowercase().contains("artifact"))
}

/// Untagged and "any" items fit every faction, and an empty or "any" request
/// accepts every item. Otherwise a case-insensitive match.
pub fn matches_faction(item: &GearItem, faction: &str) -> bool {
    let want = faction.trim();
    if want.is_empty() || want.eq_ignore_ascii_case(ANY_FACTION) {
        return true;
    }
    let f = item.faction.trim();
    f.is_empty() || f.eq_ignore_ascii_case(ANY_FACTION) || f.eq_ignore_ascii_case(want)
}

/// Whether `item` may appear in a loadout for `faction`.
pub fn is_eligible(item: &GearItem, faction: &str) -> bool {
    has_usable_name(&item.name)
        && !is_placeholder_name(&item.name)
        && !is_artifact(item)
        && matches_faction(item, faction)
}

pub fn is_weapon(item: &GearItem) -> bool {
    item.gear_type.trim().eq_ignore_ascii_case("weapon")
}

/// Occupies an ammunition slot (by slot type or gear type).
pub fn is_ammunition(item: &GearItem) -> bool {
    [&item.slot_type, &item.gear_type]
        .iter()
        .any(|s| s.to_lowercase().contains("ammo") || s.to_lowercase().contains("ammunition"))
}

/// Kind of an ammunition item, read from its name. `None` for non-ammo or
/// ammo whose name names no known container.
pub fn ammo_kind_of_item(item: &GearItem) -> Option<AmmoKind> {
    if !is_ammunition(item) {
        return None;
    }
    ammo_kind_in(&item.name)
}

/// Kind of ammunition a weapon consumes, from its "Ammo Requirement" text.
pub fn weapon_ammo_kind(weapon: &GearItem) -> Option<AmmoKind> {
    if !is_weapon(weapon) {
        return None;
    }
    weapon.ammo_requirement.as_deref().and_then(ammo_kind_in)
}

pub fn handedness(item: &GearItem) -> Handedness {
    let s = item.slot_type.to_lowercase();
    if s.contains("two") && s.contains("hand") {
        Handedness::TwoHanded
    } else if s.contains("one") && s.contains("hand") {
        Handedness::OneHanded
    } else {
        Handedness::Unspecified
    }
}

/// Whether `candidate` can be added next to the weapons already `held`.
///
/// Nothing held: any weapon. One held: only if neither occupies both hands.
/// Two held: nothing more.
pub fn can_add_weapon(held: &[&GearItem], candidate: &GearItem) -> bool {
    match held {
        [] => true,
        [first] => {
            handedness(first) != Handedness::TwoHanded
                && handedness(candidate) != Handedness::TwoHanded
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GearItem;

    fn item(name: &str, gear_type: &str, slot_type: &str) -> GearItem {
        GearItem {
            name: name.to_string(),
            gear_type: gear_type.to_string(),
            slot_type: slot_type.to_string(),
            ..GearItem::default()
        }
    }

    #[test]
    fn test_usable_name() {
        assert!(has_usable_name("Iron Dagger"));
        assert!(!has_usable_name("   "));
        assert!(!has_usable_name("NaN"));
    }

    #[test]
    fn test_placeholder_name() {
        assert!(is_placeholder_name("Insert Name Here"));
        assert!(is_placeholder_name("[INSERT]"));
        assert!(!is_placeholder_name("Iron Dagger"));
    }

    #[test]
    fn test_artifact_by_any_field() {
        assert!(is_artifact(&item("Crown", "Artifact", "Head")));
        assert!(is_artifact(&item("Crown", "Armor", "Artifact Slot")));
        assert!(is_artifact(&item("Artifact of Dawn", "Accessory", "Ring")));
        assert!(!is_artifact(&item("Crown", "Armor", "Head")));
    }

    #[test]
    fn test_faction_matching() {
        let mut g = item("Cloak", "Armor", "Back");
        assert!(matches_faction(&g, "Legion"));
        g.faction = "Any".into();
        assert!(matches_faction(&g, "Bandit"));
        g.faction = "legion".into();
        assert!(matches_faction(&g, "Legion"));
        assert!(!matches_faction(&g, "Conclave"));
    }

    #[test]
    fn test_unrestricted_request_accepts_tagged_items() {
        let mut g = item("Cloak", "Armor", "Back");
        g.faction = "Legion".into();
        assert!(matches_faction(&g, "any"));
        assert!(matches_faction(&g, "Any"));
        assert!(matches_faction(&g, ""));
        assert!(matches_faction(&g, "  "));
        assert!(!matches_faction(&g, "Bandit"));
    }

    #[test]
    fn test_eligibility_composes_rules() {
        assert!(is_eligible(&item("Dagger", "Weapon", "One-Handed"), "Bandit"));
        assert!(!is_eligible(&item("Insert Weapon", "Weapon", "One-Handed"), "Bandit"));
        assert!(!is_eligible(&item("", "Weapon", "One-Handed"), "Bandit"));
        assert!(!is_eligible(&item("Relic", "Artifact", "Relic"), "Bandit"));
    }

    #[test]
    fn test_handedness() {
        assert_eq!(handedness(&item("a", "Weapon", "Two-Handed")), Handedness::TwoHanded);
        assert_eq!(handedness(&item("a", "Weapon", "one handed")), Handedness::OneHanded);
        assert_eq!(handedness(&item("a", "Armor", "Chest")), Handedness::Unspecified);
    }

    #[test]
    fn test_ammo_item_kind() {
        let quiver = item("Quiver of Holding", "Ammunition", "Ammunition Slot");
        let pouch = item("Shot Sack", "Gear", "Ammo");
        let arrows = item("Arrows", "Ammunition", "Ammunition Slot");
        let not_ammo = item("Quiver Cloak", "Armor", "Back");
        assert_eq!(ammo_kind_of_item(&quiver), Some(AmmoKind::Quiver));
        assert_eq!(ammo_kind_of_item(&pouch), Some(AmmoKind::Pouch));
        assert_eq!(ammo_kind_of_item(&arrows), None);
        assert!(is_ammunition(&arrows));
        assert_eq!(ammo_kind_of_item(&not_ammo), None);
    }

    #[test]
    fn test_weapon_ammo_kind() {
        let mut bow = item("Longbow", "Weapon", "Two-Handed");
        assert_eq!(weapon_ammo_kind(&bow), None);
        bow.ammo_requirement = Some("Quiver of Holding".into());
        assert_eq!(weapon_ammo_kind(&bow), Some(AmmoKind::Quiver));
        bow.ammo_requirement = Some("Powder Bag".into());
        assert_eq!(weapon_ammo_kind(&bow), Some(AmmoKind::Pouch));

        let mut cloak = item("Cloak", "Armor", "Back");
        cloak.ammo_requirement = Some("Quiver".into());
        assert_eq!(weapon_ammo_kind(&cloak), None);
    }

    #[test]
    fn test_weapon_compatibility() {
        let one = item("Dagger", "Weapon", "One-Handed");
        let other_one = item("Sword", "Weapon", "One-Handed");
        let two = item("Greataxe", "Weapon", "Two-Handed");

        assert!(can_add_weapon(&[], &two));
        assert!(can_add_weapon(&[&one], &other_one));
        assert!(!can_add_weapon(&[&one], &two));
        assert!(!can_add_weapon(&[&two], &one));
        assert!(!can_add_weapon(&[&one, &other_one], &one));
    }

    #[test]
    fn test_unspecified_slots_pair_like_one_handed() {
        let claw = item("Claw", "Weapon", "Hand");
        let fang = item("Fang", "Weapon", "Main");
        let one = item("Dagger", "Weapon", "One-Handed");
        let two = item("Greataxe", "Weapon", "Two-Handed");

        assert_eq!(handedness(&claw), Handedness::Unspecified);
        assert!(can_add_weapon(&[&claw], &fang));
        assert!(can_add_weapon(&[&one], &claw));
        assert!(!can_add_weapon(&[&claw], &two));
        assert!(!can_add_weapon(&[&two], &claw));
    }
}
