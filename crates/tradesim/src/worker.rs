//! Runs a comparison on a scoped worker thread while the caller reports progress.

use std::thread;
use std::time::Duration;

use tradesim_core::config::SimulationConfig;
use tradesim_core::error::SimulationError;
use tradesim_core::model::{Comparison, MonteCarloProgress, ReturnSeries};
use tradesim_core::run_comparison;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Run the comparison, calling `on_progress(completed, total)` from the calling
/// thread until the worker finishes.
pub fn run_with_progress<F>(
    series: &ReturnSeries,
    config: &SimulationConfig,
    progress: &MonteCarloProgress,
    mut on_progress: F,
) -> Result<Comparison, SimulationError>
where
    F: FnMut(usize, usize),
{
    let total = config.trial_count;
    thread::scope(|scope| {
        let handle = scope.spawn(|| run_comparison(series, config, Some(progress)));
        while !handle.is_finished() {
            on_progress(progress.completed(), total);
            thread::sleep(POLL_INTERVAL);
        }
        on_progress(progress.completed(), total);
        match handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    })
}

/// Logs at every quarter of the run, once each
#[derive(Debug, Default)]
pub struct QuarterLogger {
    last_quarter: usize,
}

impl QuarterLogger {
    pub fn observe(&mut self, completed: usize, total: usize) {
        if total == 0 {
            return;
        }
        let quarter = (completed * 4 / total).min(4);
        if quarter > self.last_quarter {
            self.last_quarter = quarter;
            tracing::info!(completed, total, "simulation {}% complete", quarter * 25);
        }
    }

    #[must_use]
    pub fn last_quarter(&self) -> usize {
        self.last_quarter
    }
}
