//! Monte Carlo engine: N bootstrap trials and their cross-trial summaries.
//!
//! Trials are split into fixed-size batches. One seed per batch is drawn from the
//! caller's RNG before any work starts and each batch owns a `SmallRng` seeded
//! from it, so a run is reproducible from a single seed whether the batches
//! execute on the rayon pool or sequentially.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::config::SimulationConfig;
use crate::error::{AggregationError, Result, SimulationError};
use crate::model::{
    Metric, MetricSummary, MetricVector, MonteCarloProgress, PathMatrix, ReturnSeries,
    SimulationOutput, SimulationResult,
};
use crate::path_metrics::{PathMetrics, cumulative_series};
use crate::resample::Resampler;
use crate::stats;

/// Trials per independently seeded batch
pub const MAX_BATCH_SIZE: usize = 100;

/// Orchestrates the trials of one simulation request
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: SimulationConfig,
}

struct BatchOutput {
    trials: Vec<MetricVector>,
    paths: Option<PathMatrix>,
}

impl SimulationEngine {
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run every trial and summarize each metric.
    ///
    /// All parameter checks happen before the first trial. `progress`, when given,
    /// is incremented per trial and polled for cancellation between trials.
    pub fn run<R: Rng + ?Sized>(
        &self,
        series: &ReturnSeries,
        rng: &mut R,
        progress: Option<&MonteCarloProgress>,
    ) -> Result<SimulationOutput> {
        self.config.validate()?;
        let n = self.config.trial_count;
        if n < 2 {
            return Err(AggregationError::InsufficientTrials { trials: n }.into());
        }
        let resampler = Resampler::new(series)?;

        let num_batches = n.div_ceil(MAX_BATCH_SIZE);
        let seeds: Vec<u64> = (0..num_batches).map(|_| rng.random()).collect();
        tracing::debug!(
            trials = n,
            periods = series.len(),
            batches = num_batches,
            "starting bootstrap run"
        );

        let run_batch = |(i, seed): (usize, u64)| {
            let batch_size = if i == num_batches - 1 {
                n - i * MAX_BATCH_SIZE
            } else {
                MAX_BATCH_SIZE
            };
            self.run_batch(&resampler, seed, batch_size, progress)
        };

        #[cfg(feature = "parallel")]
        let batches: Vec<BatchOutput> = seeds
            .into_par_iter()
            .enumerate()
            .map(run_batch)
            .collect::<Result<_>>()?;
        #[cfg(not(feature = "parallel"))]
        let batches: Vec<BatchOutput> = seeds
            .into_iter()
            .enumerate()
            .map(run_batch)
            .collect::<Result<_>>()?;

        let mut trials = Vec::with_capacity(n);
        let mut paths = self
            .config
            .retain_paths
            .then(|| PathMatrix::with_capacity(series.len(), n));
        for batch in batches {
            trials.extend(batch.trials);
            if let (Some(all), Some(part)) = (paths.as_mut(), batch.paths) {
                all.extend(part);
            }
        }

        let result = self.aggregate(trials)?;
        tracing::debug!(trials = result.num_trials, "bootstrap run finished");
        Ok(SimulationOutput { result, paths })
    }

    fn run_batch(
        &self,
        resampler: &Resampler<'_>,
        seed: u64,
        batch_size: usize,
        progress: Option<&MonteCarloProgress>,
    ) -> Result<BatchOutput> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let metrics = PathMetrics::new(self.config.initial_capital, self.config.sharpe_variant());
        let mut paths = self
            .config
            .retain_paths
            .then(|| PathMatrix::with_capacity(resampler.path_len(), batch_size));

        let mut path = Vec::with_capacity(resampler.path_len());
        let mut trials = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            if progress.is_some_and(MonteCarloProgress::is_cancelled) {
                return Err(SimulationError::Cancelled);
            }

            resampler.sample_path_into(&mut rng, &mut path);
            let cumulative = cumulative_series(metrics.initial_capital(), &path);
            trials.push(metrics.from_cumulative(&path, &cumulative));
            if let Some(paths) = paths.as_mut() {
                paths.push_returns(&path);
            }

            if let Some(progress) = progress {
                progress.increment();
            }
        }

        Ok(BatchOutput { trials, paths })
    }

    /// Summaries for already-computed trials, in `Metric::ALL` order
    pub fn aggregate(&self, trials: Vec<MetricVector>) -> Result<SimulationResult> {
        let summaries = Metric::ALL
            .iter()
            .map(|&metric| {
                let values: Vec<f64> = trials.iter().map(|t| t.get(metric)).collect();
                summarize(
                    &values,
                    metric,
                    self.config.quantiles(),
                    self.config.confidence,
                )
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(SimulationResult {
            num_trials: trials.len(),
            trials,
            summaries,
        })
    }
}

/// Mean, percentile columns and confidence interval of one metric's trial values.
///
/// Risk metrics get their percentile values reversed so the lowest column holds
/// the worst outcome.
pub fn summarize(
    values: &[f64],
    metric: Metric,
    quantiles: &[f64],
    confidence: f64,
) -> std::result::Result<MetricSummary, AggregationError> {
    let sorted = stats::sorted(values);
    let mean = stats::mean_sorted(&sorted)?;
    let interval = stats::confidence_interval_sorted(&sorted, confidence)?;

    let mut column_values = quantiles
        .iter()
        .map(|&q| stats::percentile_sorted(&sorted, q))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if metric.is_risk() {
        column_values.reverse();
    }

    Ok(MetricSummary {
        metric,
        mean,
        percentiles: quantiles.iter().copied().zip(column_values).collect(),
        interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationBuilder;
    use rand::rngs::StdRng;

    fn series() -> ReturnSeries {
        ReturnSeries::new(vec![12.0, -8.0, 5.0, 0.0, -3.0, 9.0, -15.0, 4.0]).unwrap()
    }

    #[test]
    fn test_trial_vectors_have_trial_count_length() {
        let config = SimulationBuilder::new().trials(257).build().unwrap();
        let engine = SimulationEngine::new(config);
        let output = engine
            .run(&series(), &mut StdRng::seed_from_u64(1), None)
            .unwrap();

        assert_eq!(output.result.num_trials, 257);
        assert_eq!(output.result.trials.len(), 257);
        assert_eq!(output.result.summaries.len(), Metric::ALL.len());
        assert!(output.paths.is_none());
    }

    #[test]
    fn test_single_trial_rejected_before_running() {
        let config = SimulationBuilder::new().trials(1).build().unwrap();
        let progress = MonteCarloProgress::new();
        let err = SimulationEngine::new(config)
            .run(&series(), &mut StdRng::seed_from_u64(1), Some(&progress))
            .unwrap_err();

        assert_eq!(
            err,
            SimulationError::Aggregation(AggregationError::InsufficientTrials { trials: 1 })
        );
        assert_eq!(progress.completed(), 0);
    }

    #[test]
    fn test_risk_percentiles_descend() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let summary = summarize(&values, Metric::MaxDrawdown, &[5.0, 50.0, 95.0], 0.95).unwrap();
        assert_eq!(summary.percentile(5.0), Some(95.0));
        assert_eq!(summary.percentile(50.0), Some(50.0));
        assert_eq!(summary.percentile(95.0), Some(5.0));

        let summary = summarize(&values, Metric::TerminalPnl, &[5.0, 95.0], 0.95).unwrap();
        assert_eq!(summary.percentile(5.0), Some(5.0));
    }

    #[test]
    fn test_retained_paths_match_trials() {
        let config = SimulationBuilder::new()
            .initial_capital(100.0)
            .trials(130)
            .retain_paths(true)
            .build()
            .unwrap();
        let output = SimulationEngine::new(config)
            .run(&series(), &mut StdRng::seed_from_u64(5), None)
            .unwrap();

        let paths = output.paths.unwrap();
        assert_eq!(paths.num_paths(), 130);
        assert_eq!(paths.periods(), 8);
        for (path, trial) in paths.paths().iter().zip(&output.result.trials) {
            let last = *path.last().unwrap();
            assert!((100.0 + last - trial.terminal_pnl).abs() < 1e-9);
        }
    }
}
