//! Simulation binary for the Survival forest.
//!
//! This is the main entry point that wires together configuration, the
//! population spawner, and the run loop. It runs passes until no predators
//! are left or a single animal remains.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `survival-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the random number generator
//! 4. Spawn the starting population
//! 5. Run the simulation loop
//! 6. Log the result

mod error;
mod report;
mod spawner;

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use survival_core::config::SimulationConfig;
use survival_core::runner::{self, RunSettings};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::report::ReportCallback;

/// Path of the optional configuration file, relative to the working directory.
const CONFIG_PATH: &str = "survival-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any initialization step or the simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.logging.level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("survival-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        pass_interval_ms = config.world.pass_interval_ms,
        initial_animals = config.population.initial_animals,
        max_passes = config.simulation.max_passes,
        "Configuration loaded"
    );

    // 3. Seed the random number generator.
    let mut rng = match config.world.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // 4. Spawn the starting population.
    let mut population = spawner::spawn_population(&config.population, &mut rng)?;
    info!("{}", population.stats());

    // 5. Run the simulation.
    let mut callback = ReportCallback::new();
    let result = runner::run_simulation(
        &mut population,
        &mut rng,
        RunSettings::from(&config),
        &mut callback,
    )
    .await
    .map_err(EngineError::from)?;

    // 6. Log results.
    runner::log_simulation_end(&result);

    let totals = callback.totals();
    info!(
        end_reason = %result.end_reason,
        passes = totals.passes,
        turns = totals.turns,
        meals = totals.meals,
        catches = totals.catches,
        failed_hunts = totals.failed_hunts,
        deaths = totals.deaths,
        "survival-engine shutdown complete"
    );

    Ok(())
}

/// Load the simulation configuration from `survival-config.yaml`.
///
/// Returns the defaults (with environment overrides applied) when the file
/// does not exist. The flag reports whether the file was read.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides()?;
        Ok((config, false))
    }
}
