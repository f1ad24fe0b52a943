//! Pass callback that reports the forest after every pass.
//!
//! The callback keeps running totals across passes so the engine can log
//! a final tally when the simulation ends.

use survival_core::pass::PassSummary;
use survival_core::runner::PassCallback;
use survival_fauna::Population;
use tracing::info;

/// Running totals across all reported passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportTotals {
    /// Passes reported.
    pub passes: u64,
    /// Turns taken.
    pub turns: usize,
    /// Herbivore meals.
    pub meals: usize,
    /// Successful hunts.
    pub catches: usize,
    /// Failed hunts.
    pub failed_hunts: usize,
    /// Animals removed from the forest.
    pub deaths: usize,
}

/// Callback that logs the census and accumulates [`ReportTotals`].
#[derive(Debug, Default)]
pub struct ReportCallback {
    totals: ReportTotals,
}

impl ReportCallback {
    /// Create a callback with zeroed totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals so far.
    pub const fn totals(&self) -> ReportTotals {
        self.totals
    }
}

impl PassCallback for ReportCallback {
    fn on_pass(&mut self, summary: &PassSummary, population: &Population) {
        let totals = &mut self.totals;
        totals.passes = totals.passes.saturating_add(1);
        totals.turns = totals.turns.saturating_add(summary.turns_taken);
        totals.meals = totals.meals.saturating_add(summary.meals());
        totals.catches = totals.catches.saturating_add(summary.catches());
        totals.failed_hunts = totals.failed_hunts.saturating_add(summary.failed_hunts());
        totals.deaths = totals.deaths.saturating_add(summary.deaths().count());

        info!(
            pass = summary.pass,
            alive = population.size(),
            catches = summary.catches(),
            failed_hunts = summary.failed_hunts(),
            total_deaths = totals.deaths,
            "Pass report"
        );
    }
}
