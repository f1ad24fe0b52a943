//! Population spawner for seeding the forest.
//!
//! At simulation start the spawner draws `initial_animals` random animals
//! from an [`AnimalGenerator`], then appends the apex predator if one is
//! configured. Strength and speed are drawn independently and uniformly
//! from the configured closed ranges; the kind is a fair coin.

use rand::Rng;
use survival_core::config::PopulationConfig;
use survival_fauna::Population;
use survival_types::{Animal, AnimalKind};
use tracing::{debug, info};

use crate::error::EngineError;

// -----------------------------------------------------------------------
// Generator
// -----------------------------------------------------------------------

/// An endless source of random animals.
///
/// The ranges must be non-empty; [`PopulationConfig::validate`] guarantees
/// that for loaded configuration.
pub struct AnimalGenerator<'a, R: ?Sized> {
    config: &'a PopulationConfig,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> AnimalGenerator<'a, R> {
    /// Create a generator over the configured attribute ranges.
    pub const fn new(config: &'a PopulationConfig, rng: &'a mut R) -> Self {
        Self { config, rng }
    }
}

impl<R: Rng + ?Sized> Iterator for AnimalGenerator<'_, R> {
    type Item = Animal;

    fn next(&mut self) -> Option<Self::Item> {
        let strength = self
            .rng
            .random_range(self.config.strength_min..=self.config.strength_max);
        let speed = self
            .rng
            .random_range(self.config.speed_min..=self.config.speed_max);
        let kind = if self.rng.random_bool(0.5) {
            AnimalKind::Predator
        } else {
            AnimalKind::Herbivore
        };
        Some(Animal::new(kind, strength, speed))
    }
}

// -----------------------------------------------------------------------
// Spawning
// -----------------------------------------------------------------------

/// Build the starting population.
///
/// # Errors
///
/// Returns [`EngineError::Config`] if an attribute range is empty, or
/// [`EngineError::Spawner`] if an animal cannot be added.
pub fn spawn_population<R: Rng + ?Sized>(
    config: &PopulationConfig,
    rng: &mut R,
) -> Result<Population, EngineError> {
    config.validate()?;

    let mut population = Population::new();

    let count = usize::try_from(config.initial_animals).unwrap_or(usize::MAX);
    for animal in AnimalGenerator::new(config, rng).take(count) {
        debug!(
            animal = %animal.id(),
            kind = %animal.kind(),
            strength = animal.max_strength(),
            speed = animal.speed(),
            "Adding animal to the forest"
        );
        population.add(animal)?;
    }

    if let Some(apex) = config.apex_predator {
        let animal = Animal::predator(apex.strength, apex.speed);
        debug!(
            animal = %animal.id(),
            strength = apex.strength,
            speed = apex.speed,
            "Adding apex predator to the forest"
        );
        population.add(animal)?;
    }

    let stats = population.stats();
    info!(
        animals = population.size(),
        herbivores = stats.herbivores,
        predators = stats.predators,
        "Forest populated"
    );

    Ok(population)
}
