//! Core records for the Survival simulation.
//!
//! [`Animal`] keeps its fields private so that the birth maximum and speed
//! cannot be changed after creation, and so that every strength write goes
//! through [`Animal::set_strength`], which guards the upper bound.

use serde::{Deserialize, Serialize};

use crate::enums::AnimalKind;
use crate::ids::AnimalId;

// ---------------------------------------------------------------------------
// Animal
// ---------------------------------------------------------------------------

/// A single animal living in the habitat.
///
/// Invariant: `0 <= current_strength <= max_strength`. The lower bound is
/// carried by the unsigned type; the upper bound is asserted on every write
/// in debug builds and clamped in release builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Animal {
    id: AnimalId,
    kind: AnimalKind,
    max_strength: u32,
    current_strength: u32,
    speed: u32,
}

impl Animal {
    /// Create a new animal at full strength with a fresh identity.
    pub fn new(kind: AnimalKind, strength: u32, speed: u32) -> Self {
        Self {
            id: AnimalId::new(),
            kind,
            max_strength: strength,
            current_strength: strength,
            speed,
        }
    }

    /// Create a predator at full strength.
    pub fn predator(strength: u32, speed: u32) -> Self {
        Self::new(AnimalKind::Predator, strength, speed)
    }

    /// Create a herbivore at full strength.
    pub fn herbivore(strength: u32, speed: u32) -> Self {
        Self::new(AnimalKind::Herbivore, strength, speed)
    }

    /// Return this animal with its current strength lowered to `strength`.
    ///
    /// Used to seed worn-down animals, mostly in tests and scenarios.
    #[must_use]
    pub fn wounded_to(mut self, strength: u32) -> Self {
        self.set_strength(strength);
        self
    }

    /// The animal's identity.
    pub const fn id(&self) -> AnimalId {
        self.id
    }

    /// The animal's kind.
    pub const fn kind(&self) -> AnimalKind {
        self.kind
    }

    /// Strength at birth; the ceiling for all restoration.
    pub const fn max_strength(&self) -> u32 {
        self.max_strength
    }

    /// Current strength. Zero means dead.
    pub const fn current_strength(&self) -> u32 {
        self.current_strength
    }

    /// Speed, fixed at birth.
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Whether the animal has no strength left.
    pub const fn is_exhausted(&self) -> bool {
        self.current_strength == 0
    }

    /// Overwrite the current strength.
    ///
    /// Writing a value above `max_strength` is a programming defect: it
    /// fails the debug assertion, and release builds clamp it to the max.
    pub fn set_strength(&mut self, strength: u32) {
        debug_assert!(
            strength <= self.max_strength,
            "strength {strength} exceeds birth maximum {} for animal {}",
            self.max_strength,
            self.id
        );
        self.current_strength = strength.min(self.max_strength);
    }
}

// ---------------------------------------------------------------------------
// PopulationStats
// ---------------------------------------------------------------------------

/// Head count of the living population, split by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Number of living herbivores.
    pub herbivores: usize,
    /// Number of living predators.
    pub predators: usize,
}

impl PopulationStats {
    /// Total living animals.
    pub const fn total(&self) -> usize {
        self.herbivores.saturating_add(self.predators)
    }

    /// Count one more animal of the given kind.
    pub const fn record(&mut self, kind: AnimalKind) {
        match kind {
            AnimalKind::Predator => self.predators = self.predators.saturating_add(1),
            AnimalKind::Herbivore => self.herbivores = self.herbivores.saturating_add(1),
        }
    }
}

impl core::fmt::Display for PopulationStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "In forest {} herbivorous animals and {} predators",
            self.herbivores, self.predators
        )
    }
}
