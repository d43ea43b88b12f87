//! Actual-vs-simulated comparison.
//!
//! The benchmark is the historical path itself, scored with the same
//! [`PathMetrics`] as every synthetic path, so each report row lines the real
//! outcome up against its bootstrap distribution.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::model::{BenchmarkResult, Comparison, MonteCarloProgress, ReturnSeries};
use crate::path_metrics::PathMetrics;
use crate::simulation::SimulationEngine;

#[derive(Debug, Clone)]
pub struct BenchmarkComparator {
    engine: SimulationEngine,
}

impl BenchmarkComparator {
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            engine: SimulationEngine::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        self.engine.config()
    }

    /// Metrics of the historical path, no resampling involved
    pub fn benchmark(&self, series: &ReturnSeries) -> Result<BenchmarkResult> {
        let config = self.config();
        config.validate()?;

        let metrics = PathMetrics::new(config.initial_capital, config.sharpe_variant())
            .compute(series.values());
        Ok(BenchmarkResult {
            initial_capital: config.initial_capital,
            periods: series.len(),
            metrics,
        })
    }

    /// Benchmark plus a full simulation drawn from `rng`
    pub fn compare<R: Rng + ?Sized>(
        &self,
        series: &ReturnSeries,
        rng: &mut R,
        progress: Option<&MonteCarloProgress>,
    ) -> Result<Comparison> {
        let benchmark = self.benchmark(series)?;
        let output = self.engine.run(series, rng, progress)?;
        tracing::debug!(
            actual_terminal = benchmark.metrics.terminal_pnl,
            trials = output.result.num_trials,
            "comparison ready"
        );

        Ok(Comparison {
            benchmark,
            simulation: output.result,
            paths: output.paths,
        })
    }
}

/// One-shot comparison seeded from `config.seed`, or OS entropy when unset
pub fn run_comparison(
    series: &ReturnSeries,
    config: &SimulationConfig,
    progress: Option<&MonteCarloProgress>,
) -> Result<Comparison> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    BenchmarkComparator::new(config.clone()).compare(series, &mut rng, progress)
}
