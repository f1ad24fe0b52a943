//! The population container and pass traversal.
//!
//! [`Population`] owns every living [`Animal`]. Records are kept in a map
//! keyed by identity, and a separate vector holds identities in insertion
//! order. Removing an animal drops it from both.
//!
//! A pass does not walk live positions. [`Population::iterate_pass`] copies
//! the identity order at pass start into a [`Pass`], and each step looks the
//! next identity up again before yielding it. An animal removed mid-pass is
//! therefore skipped, an animal added mid-pass is not visited, and nobody
//! else is skipped or visited twice.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use survival_types::{Animal, AnimalId, PopulationStats};
use tracing::trace;

use crate::error::AnimalError;

/// A mutable collection of living animals in stable insertion order.
#[derive(Debug, Clone, Default)]
pub struct Population {
    /// Identities in insertion order.
    order: Vec<AnimalId>,
    /// Animal records keyed by identity.
    animals: BTreeMap<AnimalId, Animal>,
}

impl Population {
    /// Create an empty population.
    pub const fn new() -> Self {
        Self {
            order: Vec::new(),
            animals: BTreeMap::new(),
        }
    }

    /// Build a population from animals, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`AnimalError::DuplicateAnimal`] if two animals share an id.
    pub fn from_animals<I>(animals: I) -> Result<Self, AnimalError>
    where
        I: IntoIterator<Item = Animal>,
    {
        let mut population = Self::new();
        for animal in animals {
            population.add(animal)?;
        }
        Ok(population)
    }

    /// Append a new animal at the end of the order.
    ///
    /// # Errors
    ///
    /// Returns [`AnimalError::DuplicateAnimal`] if the identity is taken.
    pub fn add(&mut self, animal: Animal) -> Result<(), AnimalError> {
        let id = animal.id();
        if self.animals.contains_key(&id) {
            return Err(AnimalError::DuplicateAnimal(id));
        }
        trace!(
            animal = %id,
            kind = %animal.kind(),
            strength = animal.current_strength(),
            speed = animal.speed(),
            "Animal added"
        );
        self.order.push(id);
        self.animals.insert(id, animal);
        Ok(())
    }

    /// Remove an animal by identity.
    ///
    /// Removing an identity that is not present is a no-op: a victim may
    /// already have been removed earlier in the same pass. Returns `true`
    /// if an animal was removed.
    pub fn remove(&mut self, id: AnimalId) -> bool {
        self.take(id).is_ok()
    }

    /// Remove an animal by identity and return its record.
    ///
    /// # Errors
    ///
    /// Returns [`AnimalError::UnknownAnimal`] if the identity is not present.
    pub fn take(&mut self, id: AnimalId) -> Result<Animal, AnimalError> {
        let animal = self
            .animals
            .remove(&id)
            .ok_or(AnimalError::UnknownAnimal(id))?;
        if let Some(position) = self.order.iter().position(|other| *other == id) {
            self.order.remove(position);
        }
        Ok(animal)
    }

    /// Pick a uniformly random living animal.
    ///
    /// Every member is equally likely, including the caller's own animal.
    ///
    /// # Errors
    ///
    /// Returns [`AnimalError::EmptyPopulation`] if no animals remain.
    pub fn random_member<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<AnimalId, AnimalError> {
        self.order
            .choose(rng)
            .copied()
            .ok_or(AnimalError::EmptyPopulation)
    }

    /// Whether at least one living animal is a predator.
    pub fn has_predator(&self) -> bool {
        self.animals.values().any(|animal| animal.kind().is_predator())
    }

    /// Number of living animals.
    pub const fn size(&self) -> usize {
        self.order.len()
    }

    /// Whether no animals remain.
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether an animal with this identity is alive.
    pub fn contains(&self, id: AnimalId) -> bool {
        self.animals.contains_key(&id)
    }

    /// Look up a living animal.
    pub fn get(&self, id: AnimalId) -> Option<&Animal> {
        self.animals.get(&id)
    }

    /// Look up a living animal for mutation.
    pub fn get_mut(&mut self, id: AnimalId) -> Option<&mut Animal> {
        self.animals.get_mut(&id)
    }

    /// Living animals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Animal> {
        self.order.iter().filter_map(|id| self.animals.get(id))
    }

    /// Head count by kind.
    pub fn stats(&self) -> PopulationStats {
        let mut stats = PopulationStats::default();
        for animal in self.animals.values() {
            stats.record(animal.kind());
        }
        stats
    }

    /// Start a pass over the animals alive right now.
    ///
    /// The returned [`Pass`] is a one-shot snapshot; call this again for the
    /// next pass.
    pub fn iterate_pass(&self) -> Pass {
        Pass {
            remaining: self.order.clone().into_iter(),
        }
    }
}

/// A single traversal over the identities alive when it started.
///
/// Finite and not restartable. It does not borrow the population, so turns
/// may add and remove animals between steps.
#[derive(Debug, Clone)]
pub struct Pass {
    remaining: std::vec::IntoIter<AnimalId>,
}

impl Pass {
    /// Advance to the next animal from the snapshot that is still alive.
    ///
    /// Animals removed since the pass began are skipped silently.
    pub fn next_alive(&mut self, population: &Population) -> Option<AnimalId> {
        self.remaining.find(|id| population.contains(*id))
    }

    /// Snapshot entries not yet reached, alive or not.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}
