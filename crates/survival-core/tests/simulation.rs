//! End-to-end tests for configuration, passes, and the run loop.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use survival_core::config::SimulationConfig;
use survival_core::pass::{PassSummary, run_pass};
use survival_core::runner::{
    NoOpCallback, PassCallback, RunSettings, SimulationEndReason, end_condition, run_simulation,
};
use survival_fauna::{DeathCause, Population, TurnEvent};
use survival_types::{Animal, AnimalKind};

fn forest(seed: u64, count: u32) -> Population {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut population = Population::new();
    for _ in 0..count {
        let strength = rng.random_range(25..=100);
        let speed = rng.random_range(25..=100);
        let kind = if rng.random_bool(0.5) {
            AnimalKind::Predator
        } else {
            AnimalKind::Herbivore
        };
        population.add(Animal::new(kind, strength, speed)).unwrap();
    }
    population.add(Animal::predator(95, 95)).unwrap();
    population
}

/// Records every summary it receives.
#[derive(Default)]
struct Recorder {
    summaries: Vec<PassSummary>,
}

impl PassCallback for Recorder {
    fn on_pass(&mut self, summary: &PassSummary, _population: &Population) {
        self.summaries.push(summary.clone());
    }
}

#[tokio::test]
async fn full_forest_runs_to_structural_end() {
    let mut population = forest(7, 100);
    let mut rng = StdRng::seed_from_u64(7);
    let mut recorder = Recorder::default();

    let result = run_simulation(
        &mut population,
        &mut rng,
        RunSettings::unpaced(),
        &mut recorder,
    )
    .await;
    assert!(result.is_ok());
    let result = result.unwrap();

    assert!(matches!(
        result.end_reason,
        SimulationEndReason::NoPredatorsLeft
            | SimulationEndReason::SoleSurvivor
            | SimulationEndReason::Extinction
    ));
    assert!(!population.has_predator() || population.size() <= 1);
    assert_eq!(u64::try_from(recorder.summaries.len()).unwrap(), result.total_passes);

    // Each pass is numbered and its census matches the next pass's start.
    for (number, summary) in (1..).zip(&recorder.summaries) {
        assert_eq!(summary.pass, number);
        assert!(summary.turns_taken <= summary.snapshot_size);
    }
    for pair in recorder.summaries.windows(2) {
        if let [previous, next] = pair {
            assert_eq!(previous.stats.total(), next.snapshot_size);
        }
    }
}

#[tokio::test]
async fn same_seed_same_history() {
    async fn history(seed: u64) -> Vec<(usize, usize)> {
        let mut population = forest(seed, 40);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut recorder = Recorder::default();
        run_simulation(
            &mut population,
            &mut rng,
            RunSettings::unpaced(),
            &mut recorder,
        )
        .await
        .unwrap();
        recorder
            .summaries
            .iter()
            .map(|summary| (summary.stats.herbivores, summary.stats.predators))
            .collect()
    }

    assert_eq!(history(99).await, history(99).await);
}

#[tokio::test]
async fn configured_pass_limit_stops_early() {
    let config = SimulationConfig::parse(
        "world:\n  pass_interval_ms: 0\nsimulation:\n  max_passes: 1\n",
    )
    .unwrap();
    // Slow predators never catch fast herbivores, so one pass cannot settle.
    let mut population = Population::new();
    population.add(Animal::predator(100, 25)).unwrap();
    for _ in 0..10 {
        population.add(Animal::herbivore(100, 100)).unwrap();
    }
    let mut rng = StdRng::seed_from_u64(3);

    let result = run_simulation(
        &mut population,
        &mut rng,
        RunSettings::from(&config),
        &mut NoOpCallback,
    )
    .await
    .unwrap();

    assert_eq!(result.end_reason, SimulationEndReason::MaxPassesReached);
    assert_eq!(result.total_passes, 1);
}

#[test]
fn lone_predator_starves_slowly() {
    // A predator alone with nothing catchable: it only ever draws itself or
    // a faster herbivore, and its strength falls every pass.
    let predator = Animal::predator(10, 25);
    let predator_id = predator.id();
    let mut population =
        Population::from_animals([predator, Animal::herbivore(100, 100)]).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let mut pass = 0;
    while end_condition(&population).is_none() {
        pass += 1;
        let summary = run_pass(pass, &mut population, &mut rng).unwrap();
        if let Some(strength) = population.get(predator_id).map(Animal::current_strength) {
            assert!(strength < 10);
        } else {
            let death = summary
                .deaths()
                .find(|record| record.animal_id == predator_id)
                .unwrap();
            assert!(matches!(
                death.cause,
                DeathCause::Starved | DeathCause::Wounded
            ));
        }
        assert!(pass < 100, "predator must die within its strength budget");
    }

    assert_eq!(end_condition(&population), Some(SimulationEndReason::SoleSurvivor));
    assert!(!population.has_predator());
}

#[test]
fn herbivores_never_hunt() {
    let mut population = Population::from_animals([
        Animal::herbivore(60, 60).wounded_to(10),
        Animal::herbivore(80, 30),
    ])
    .unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let summary = run_pass(1, &mut population, &mut rng).unwrap();

    assert!(summary.outcomes.iter().all(|outcome| {
        outcome
            .events
            .iter()
            .all(|event| matches!(event, TurnEvent::Fed { .. }))
    }));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Whole runs over random forests always end on a structural condition
    /// with every survivor inside its strength bounds.
    #[test]
    fn prop_runs_terminate_cleanly(seed in any::<u64>(), count in 1u32..60) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let mut population = forest(seed, count);
        let mut rng = StdRng::seed_from_u64(seed);

        let result = runtime
            .block_on(run_simulation(
                &mut population,
                &mut rng,
                RunSettings::unpaced(),
                &mut NoOpCallback,
            ))
            .unwrap();

        prop_assert_ne!(result.end_reason, SimulationEndReason::MaxPassesReached);
        prop_assert_eq!(Some(result.end_reason), end_condition(&population));
        prop_assert_eq!(result.survivors.len(), population.size());
        for animal in &result.survivors {
            prop_assert!(animal.current_strength() > 0);
            prop_assert!(animal.current_strength() <= animal.max_strength());
        }
    }
}
