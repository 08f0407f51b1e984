//! Intelligence roll: one d20 mapped onto five labels.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::INTELLIGENCE_DIE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intelligence {
    /// Roll of 1.
    Dumb,
    /// 2–6.
    Dimwitted,
    /// 7–15.
    Average,
    /// 16–19.
    Cunning,
    /// Natural 20.
    Genius,
}

impl Intelligence {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0..=1 => Intelligence::Dumb,
            2..=6 => Intelligence::Dimwitted,
            7..=15 => Intelligence::Average,
            16..=19 => Intelligence::Cunning,
            _ => Intelligence::Genius,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Intelligence::Dumb => "Dumb",
            Intelligence::Dimwitted => "Dimwitted",
            Intelligence::Average => "Average",
            Intelligence::Cunning => "Cunning",
            Intelligence::Genius => "Genius",
        }
    }
}

impl fmt::Display for Intelligence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Roll a d20 and classify it.
pub fn roll_intelligence<R: Rng + ?Sized>(rng: &mut R) -> (u8, Intelligence) {
    let roll = rng.gen_range(1..=INTELLIGENCE_DIE);
    (roll, Intelligence::from_roll(roll))
}
