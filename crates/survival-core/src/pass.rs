//! Pass cycle: one full traversal giving every living animal one turn.
//!
//! A pass snapshots the population's identity order at its start, then
//! visits each identity that is still alive when its turn comes up. Turns
//! run strictly one after another; each may feed, hunt, and remove animals
//! before the next begins.
//!
//! The pass is synchronous and deterministic given the population and the
//! random number generator.

use rand::Rng;
use survival_fauna::{AnimalError, DeathRecord, Population, TurnEvent, TurnOutcome, turn};
use survival_types::{AnimalId, PopulationStats};
use tracing::{debug, info};

/// Errors that can occur during pass execution.
#[derive(Debug, thiserror::Error)]
pub enum PassError {
    /// An animal's turn failed.
    #[error("turn error for {animal_id}: {source}")]
    Turn {
        /// The animal whose turn failed.
        animal_id: AnimalId,
        /// The underlying animal error.
        source: AnimalError,
    },
}

/// Summary of a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSummary {
    /// The pass number, starting at 1.
    pub pass: u64,
    /// Number of animals in the snapshot at pass start.
    pub snapshot_size: usize,
    /// Turns actually taken (snapshot minus animals removed before their turn).
    pub turns_taken: usize,
    /// Every turn's outcome, in visiting order.
    pub outcomes: Vec<TurnOutcome>,
    /// Population census at the end of the pass.
    pub stats: PopulationStats,
}

impl PassSummary {
    /// Deaths across all turns of the pass, in order.
    pub fn deaths(&self) -> impl Iterator<Item = &DeathRecord> {
        self.outcomes.iter().flat_map(TurnOutcome::deaths)
    }

    /// Number of successful hunts in the pass.
    pub fn catches(&self) -> usize {
        self.count_events(|event| matches!(event, TurnEvent::Caught { .. }))
    }

    /// Number of failed hunts in the pass.
    pub fn failed_hunts(&self) -> usize {
        self.count_events(|event| matches!(event, TurnEvent::HuntFailed { .. }))
    }

    /// Number of herbivore meals in the pass.
    pub fn meals(&self) -> usize {
        self.count_events(|event| matches!(event, TurnEvent::Fed { .. }))
    }

    fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&TurnEvent) -> bool,
    {
        self.outcomes
            .iter()
            .flat_map(|outcome| outcome.events.iter())
            .filter(|event| predicate(event))
            .count()
    }
}

/// Execute one complete pass over the population.
///
/// # Errors
///
/// Returns [`PassError::Turn`] if any turn fails. The population keeps the
/// effects of the turns that completed before the failure.
pub fn run_pass<R: Rng + ?Sized>(
    pass: u64,
    population: &mut Population,
    rng: &mut R,
) -> Result<PassSummary, PassError> {
    let mut traversal = population.iterate_pass();
    let snapshot_size = traversal.remaining();
    let mut outcomes = Vec::with_capacity(snapshot_size);

    debug!(pass, snapshot_size, "Pass started");

    while let Some(animal_id) = traversal.next_alive(population) {
        let outcome = turn::act(animal_id, population, rng)
            .map_err(|source| PassError::Turn { animal_id, source })?;
        outcomes.push(outcome);
    }

    let stats = population.stats();
    let summary = PassSummary {
        pass,
        snapshot_size,
        turns_taken: outcomes.len(),
        outcomes,
        stats,
    };

    info!(
        pass,
        herbivores = stats.herbivores,
        predators = stats.predators,
        turns = summary.turns_taken,
        deaths = summary.deaths().count(),
        "{stats}"
    );

    Ok(summary)
}
