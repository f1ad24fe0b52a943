//! Death conditions and records for animals.
//!
//! An animal dies the instant its strength reaches zero. The cause is
//! determined by which turn step drove it there.

use survival_types::{Animal, AnimalId, AnimalKind};

/// The cause of an animal's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Found with zero strength at the start of its own turn.
    Exhausted,
    /// A predator drew itself and the flat penalty took its last strength.
    Starved,
    /// Caught and eaten by a predator.
    Eaten,
    /// Strength ran out after a failed hunt, as hunter or as quarry.
    Wounded,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::Starved => write!(f, "starved"),
            Self::Eaten => write!(f, "eaten"),
            Self::Wounded => write!(f, "wounded"),
        }
    }
}

/// Check whether an animal meets the death condition.
///
/// Returns `Some(cause)` when strength is zero, `None` otherwise. The caller
/// supplies the cause that applies to the step it just ran.
pub const fn check_death(animal: &Animal, cause: DeathCause) -> Option<DeathCause> {
    if animal.is_exhausted() {
        Some(cause)
    } else {
        None
    }
}

/// Data emitted when an animal is removed from the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathRecord {
    /// The animal that died.
    pub animal_id: AnimalId,
    /// Its kind.
    pub kind: AnimalKind,
    /// The cause of death.
    pub cause: DeathCause,
    /// The predator responsible, for [`DeathCause::Eaten`].
    pub killer: Option<AnimalId>,
}

impl DeathRecord {
    /// Build a record for an animal that died of its own turn's effects.
    pub const fn of(animal: &Animal, cause: DeathCause) -> Self {
        Self {
            animal_id: animal.id(),
            kind: animal.kind(),
            cause,
            killer: None,
        }
    }

    /// Build a record for a victim eaten by `killer`.
    pub const fn eaten_by(animal: &Animal, killer: AnimalId) -> Self {
        Self {
            animal_id: animal.id(),
            kind: animal.kind(),
            cause: DeathCause::Eaten,
            killer: Some(killer),
        }
    }
}
