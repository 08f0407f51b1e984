//! Sentient name assignment from a fixed pool.

use rand::Rng;

use crate::select::pick;

// Placeholder pool until names are authored per race.
static NAME_POOL: &[&str] = &["Ayo", "Berlin", "Corin", "Dora", "Marrick", "Gaelan"];

pub fn name_pool() -> &'static [&'static str] {
    NAME_POOL
}

/// Uniform pick from the name pool. Consumes one draw.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(name_pool(), rng).unwrap_or_default().to_string()
}
