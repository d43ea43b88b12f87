//! Simulation results and summaries
//!
//! Contains the output types from a Monte Carlo run: the per-trial metric
//! vectors, their distributional summaries, the historical benchmark and the
//! side-by-side comparison consumed by presentation layers.

use serde::{Deserialize, Serialize};

use super::metric::{Metric, MetricVector};
use super::paths::PathMatrix;

/// Two-sided confidence interval of a mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Confidence level, e.g. 0.95
    pub confidence: f64,
    pub low: f64,
    pub high: f64,
}

impl ConfidenceInterval {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Cross-trial summary of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub mean: f64,
    /// (column quantile, value) pairs in column order.
    ///
    /// For risk metrics the values are reversed, so the 5% column holds the
    /// 95th percentile (the worst-case tail).
    pub percentiles: Vec<(f64, f64)>,
    pub interval: ConfidenceInterval,
}

impl MetricSummary {
    /// Value reported in the column for quantile `q` (e.g. 5.0)
    #[must_use]
    pub fn percentile(&self, q: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(p, _)| (*p - q).abs() < 1e-9)
            .map(|(_, v)| *v)
    }
}

/// Per-trial metric values across all N trials, with their summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub num_trials: usize,
    /// One `MetricVector` per trial, in trial-generation order
    pub trials: Vec<MetricVector>,
    /// One summary per metric, in `Metric::ALL` order
    pub summaries: Vec<MetricSummary>,
}

impl SimulationResult {
    #[must_use]
    pub fn summary(&self, metric: Metric) -> Option<&MetricSummary> {
        self.summaries.iter().find(|s| s.metric == metric)
    }
}

/// Output of one engine run: the result plus, optionally, the charting matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub result: SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathMatrix>,
}

/// Metrics of the real historical path, with no distributional fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub initial_capital: f64,
    pub periods: usize,
    pub metrics: MetricVector,
}

/// One presentation row: actual vs. simulated distribution for a metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub metric: Metric,
    pub actual: f64,
    pub mean: f64,
    pub percentiles: Vec<(f64, f64)>,
    pub interval: ConfidenceInterval,
}

/// Historical benchmark paired with the simulated distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub benchmark: BenchmarkResult,
    pub simulation: SimulationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathMatrix>,
}

impl Comparison {
    /// Quantile columns shared by every row
    #[must_use]
    pub fn quantiles(&self) -> Vec<f64> {
        self.simulation
            .summaries
            .first()
            .map(|s| s.percentiles.iter().map(|(q, _)| *q).collect())
            .unwrap_or_default()
    }

    /// Rows in report order
    #[must_use]
    pub fn rows(&self) -> Vec<ComparisonRow> {
        self.simulation
            .summaries
            .iter()
            .map(|s| ComparisonRow {
                metric: s.metric,
                actual: self.benchmark.metrics.get(s.metric),
                mean: s.mean,
                percentiles: s.percentiles.clone(),
                interval: s.interval,
            })
            .collect()
    }
}
