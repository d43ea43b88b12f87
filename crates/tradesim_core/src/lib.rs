//! Bootstrap Monte Carlo for trading-performance outcomes
//!
//! Given a historical series of per-period P&L, this crate estimates the
//! distribution of performance metrics by i.i.d. resampling with replacement:
//! - Resampling of synthetic paths the length of the history
//! - Per-path metrics (terminal P&L, win probability, P/L ratio, Sharpe-like
//!   ratio, CAGR, maximum drawdown, underwater duration, reward ratio)
//! - Cross-trial mean, percentile columns and t-based confidence intervals
//! - A side-by-side comparison against the actual historical path
//!
//! # Builder DSL
//!
//! ```ignore
//! use tradesim_core::{SimulationBuilder, ReturnSeries, run_comparison};
//!
//! let series = ReturnSeries::new(vec![12.5, -4.0, 0.0, 7.25, -9.5])?;
//! let config = SimulationBuilder::new()
//!     .initial_capital(4_000.0)
//!     .trials(1_000)
//!     .seed(42)
//!     .build()?;
//! let comparison = run_comparison(&series, &config, None)?;
//! for row in comparison.rows() {
//!     println!("{}: actual {} mean {}", row.metric.label(), row.actual, row.mean);
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod benchmark;
pub mod error;
pub mod path_metrics;
pub mod resample;
pub mod simulation;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use benchmark::{BenchmarkComparator, run_comparison};
pub use config::{PresentationMode, SharpeVariant, SimulationBuilder, SimulationConfig};
pub use error::{AggregationError, InputError, SimulationError};
pub use model::{
    Comparison, Metric, MetricVector, MonteCarloProgress, PathMatrix, ReturnSeries,
    SimulationResult,
};
pub use path_metrics::PathMetrics;
pub use resample::Resampler;
pub use simulation::SimulationEngine;
