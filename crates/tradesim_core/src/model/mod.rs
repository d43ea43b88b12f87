mod metric;
mod paths;
mod progress;
mod results;
mod returns;

pub use metric::{Metric, MetricUnit, MetricVector};
pub use paths::{BAND_QUANTILES, PathMatrix, PercentileBand, SAMPLE_PATHS};
pub use progress::MonteCarloProgress;
pub use results::{
    BenchmarkResult, Comparison, ComparisonRow, ConfidenceInterval, MetricSummary,
    SimulationOutput, SimulationResult,
};
pub use returns::{MIN_RETURNS, ReturnSeries, ReturnStatistics};
