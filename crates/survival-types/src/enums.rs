//! Enumeration types for the Survival simulation.

use serde::{Deserialize, Serialize};

/// The kind of an animal, fixed at birth.
///
/// The kind selects which turn behavior runs when the animal is visited:
/// herbivores feed, predators hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalKind {
    /// Hunts a randomly drawn member of the population each turn.
    Predator,
    /// Feeds each turn, restoring half of its current strength.
    Herbivore,
}

impl AnimalKind {
    /// Whether this kind hunts.
    pub const fn is_predator(self) -> bool {
        matches!(self, Self::Predator)
    }
}

impl core::fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Predator => write!(f, "predator"),
            Self::Herbivore => write!(f, "herbivore"),
        }
    }
}
