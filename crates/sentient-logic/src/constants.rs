//! Game constants: stat names, resistance channels and factions.
//!
//! Plain `&str` tables shared by the loader, the aggregator and the harness.

/// Canonical stat names.
pub mod stats {
    pub const HEALTH: &str = "Health";
    pub const MANA: &str = "Mana";
    pub const DEFENSE: &str = "Defense";
    pub const DISPERSION: &str = "Dispersion";
    pub const STRENGTH: &str = "Strength";
    pub const DEXTERITY: &str = "Dexterity";
    pub const POWER: &str = "Power";
    pub const STAMINA: &str = "Stamina";
    pub const MOBILITY: &str = "Mobility";
    pub const MIGHT: &str = "Might";
    pub const WISDOM: &str = "Wisdom";
    pub const FORTITUDE: &str = "Fortitude";
    pub const DEFLECTION: &str = "Deflection";
    pub const FAITH: &str = "Faith";

    /// Stats every race row carries as plain numbers.
    pub const BASE: [&str; 8] = [
        HEALTH, MANA, DEFENSE, DISPERSION, STRENGTH, DEXTERITY, POWER, STAMINA,
    ];

    /// Every stat column a gear row may carry.
    pub const ALL: [&str; 14] = [
        HEALTH, MANA, DEFENSE, DISPERSION, STRENGTH, DEXTERITY, POWER, STAMINA, MOBILITY,
        MIGHT, WISDOM, FORTITUDE, DEFLECTION, FAITH,
    ];
}

/// Resistance channels, stored as decimal fractions in \[-1.0, 1.0\].
pub mod resists {
    pub const LIGHT: &str = "Light";
    pub const DARK: &str = "Dark";
    pub const FIRE: &str = "Fire";
    pub const FROST: &str = "Frost";
    pub const WIND: &str = "Wind";
    pub const EARTH: &str = "Earth";
    pub const LIGHTNING: &str = "Lightning";
    pub const BLEED: &str = "Bleed";
    pub const POISON: &str = "Poison";

    pub const ALL: [&str; 9] = [LIGHT, DARK, FIRE, FROST, WIND, EARTH, LIGHTNING, BLEED, POISON];

    /// Lowest possible resistance (double damage).
    pub const MIN: f64 = -1.0;
    /// Highest possible resistance (full mitigation).
    pub const MAX: f64 = 1.0;
}

/// Factions a sentient can be generated for.
pub const FACTIONS: [&str; 3] = ["Bandit", "Legion", "Conclave"];

/// Faction tag meaning "usable by everyone".
pub const ANY_FACTION: &str = "any";

/// Marker authors leave in names of unfinished rows.
pub const PLACEHOLDER_MARKER: &str = "insert";

/// Spreadsheet exports write missing text cells as this literal.
pub const NAN_LITERAL: &str = "nan";

/// Die used for the intelligence roll.
pub const INTELLIGENCE_DIE: u8 = 20;
