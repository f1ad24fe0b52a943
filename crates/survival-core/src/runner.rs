//! Simulation loop runner.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that drives passes until the habitat settles:
//!
//! - **Structural end**: no predators left, a single survivor, or nobody
//! - **Bounded simulation**: stop after `max_passes` (0 = unlimited)
//! - **Pacing**: sleep `pass_interval` between passes
//!
//! The end condition is checked before the first pass and after every
//! completed pass. Passes themselves are synchronous; the only await point
//! is the pacing sleep between them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use survival_fauna::Population;
use survival_types::{Animal, PopulationStats};
use tracing::info;

use crate::config::SimulationConfig;
use crate::pass::{self, PassError, PassSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A pass failed.
    #[error("pass error: {source}")]
    Pass {
        /// The underlying pass error.
        #[from]
        source: PassError,
    },
}

/// Reason why the simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationEndReason {
    /// Every predator is gone.
    NoPredatorsLeft,
    /// Exactly one animal remains.
    SoleSurvivor,
    /// No animals remain.
    Extinction,
    /// Reached the configured `max_passes` limit.
    MaxPassesReached,
}

impl core::fmt::Display for SimulationEndReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoPredatorsLeft => write!(f, "no_predators_left"),
            Self::SoleSurvivor => write!(f, "sole_survivor"),
            Self::Extinction => write!(f, "extinction"),
            Self::MaxPassesReached => write!(f, "max_passes_reached"),
        }
    }
}

/// Evaluate the structural termination predicate.
///
/// The run is over when `!has_predator() || size() == 1`. An empty
/// population satisfies the first clause; it is reported separately.
pub fn end_condition(population: &Population) -> Option<SimulationEndReason> {
    if population.is_empty() {
        Some(SimulationEndReason::Extinction)
    } else if population.size() == 1 {
        Some(SimulationEndReason::SoleSurvivor)
    } else if !population.has_predator() {
        Some(SimulationEndReason::NoPredatorsLeft)
    } else {
        None
    }
}

/// Run-loop settings derived from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Maximum number of passes (0 = unlimited).
    pub max_passes: u64,
    /// Real-time wait between passes.
    pub pass_interval: Duration,
}

impl RunSettings {
    /// Settings that run to completion with no pacing.
    pub const fn unpaced() -> Self {
        Self {
            max_passes: 0,
            pass_interval: Duration::ZERO,
        }
    }

    /// Whether `completed` passes hit the configured limit.
    pub const fn pass_limit_reached(&self, completed: u64) -> bool {
        self.max_passes > 0 && completed >= self.max_passes
    }
}

impl From<&SimulationConfig> for RunSettings {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            max_passes: config.simulation.max_passes,
            pass_interval: Duration::from_millis(config.world.pass_interval_ms),
        }
    }
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// Total number of passes executed.
    pub total_passes: u64,
    /// The last pass summary, if any pass ran.
    pub final_summary: Option<PassSummary>,
    /// Census at the end of the run.
    pub final_stats: PopulationStats,
    /// Animals still alive, in insertion order.
    pub survivors: Vec<Animal>,
    /// Wall-clock time when the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock time when the run ended.
    pub finished_at: DateTime<Utc>,
}

/// Callback invoked after each pass completes.
///
/// Implementations can report the census, collect statistics, etc.
pub trait PassCallback {
    /// Called after a pass completes successfully.
    fn on_pass(&mut self, summary: &PassSummary, population: &Population);
}

/// A no-op pass callback for testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl PassCallback for NoOpCallback {
    fn on_pass(&mut self, _summary: &PassSummary, _population: &Population) {}
}

/// Run passes until a termination condition is met.
///
/// # Errors
///
/// Returns [`RunnerError`] if a pass fails.
pub async fn run_simulation<R: Rng + ?Sized>(
    population: &mut Population,
    rng: &mut R,
    settings: RunSettings,
    callback: &mut dyn PassCallback,
) -> Result<SimulationResult, RunnerError> {
    let started_at = Utc::now();
    let mut last_summary: Option<PassSummary> = None;
    let mut total_passes: u64 = 0;

    info!(
        animals = population.size(),
        max_passes = settings.max_passes,
        pass_interval_ms = u64::try_from(settings.pass_interval.as_millis()).unwrap_or(u64::MAX),
        "Simulation starting"
    );

    let end_reason = loop {
        // --- Check structural end (before pass) ---
        if let Some(reason) = end_condition(population) {
            break reason;
        }

        // --- Execute pass ---
        total_passes = total_passes.saturating_add(1);
        let summary = pass::run_pass(total_passes, population, rng)?;

        // --- Notify callback ---
        callback.on_pass(&summary, population);
        last_summary = Some(summary);

        // --- Check pass limit (after pass) ---
        if settings.pass_limit_reached(total_passes) {
            // A pass that settles the habitat reports the structural reason.
            break end_condition(population).unwrap_or(SimulationEndReason::MaxPassesReached);
        }

        // --- Sleep for pass interval ---
        if !settings.pass_interval.is_zero() && end_condition(population).is_none() {
            tokio::time::sleep(settings.pass_interval).await;
        }
    };

    Ok(SimulationResult {
        end_reason,
        total_passes,
        final_summary: last_summary,
        final_stats: population.stats(),
        survivors: population.iter().cloned().collect(),
        started_at,
        finished_at: Utc::now(),
    })
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    let elapsed_ms = result
        .finished_at
        .signed_duration_since(result.started_at)
        .num_milliseconds();
    info!(
        reason = %result.end_reason,
        total_passes = result.total_passes,
        herbivores = result.final_stats.herbivores,
        predators = result.final_stats.predators,
        elapsed_ms,
        "Simulation ended"
    );
    for animal in &result.survivors {
        info!(
            animal = %animal.id(),
            tag = %animal.id().short(),
            kind = %animal.kind(),
            strength = animal.current_strength(),
            max_strength = animal.max_strength(),
            speed = animal.speed(),
            "Survivor"
        );
    }
}
