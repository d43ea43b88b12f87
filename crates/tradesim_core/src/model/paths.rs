//! Cumulative P&L paths retained for charting

use serde::{Deserialize, Serialize};

use crate::error::AggregationError;
use crate::stats;

/// Quantiles drawn as shaded bands around the median
pub const BAND_QUANTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Number of individual paths drawn on top of the bands
pub const SAMPLE_PATHS: usize = 20;

/// N × L matrix of cumulative P&L (running sum of each synthetic path, starting
/// from zero rather than the initial capital).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathMatrix {
    periods: usize,
    paths: Vec<Vec<f64>>,
}

/// One percentile curve across periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub quantile: f64,
    pub values: Vec<f64>,
}

impl PathMatrix {
    #[must_use]
    pub fn new(periods: usize) -> Self {
        Self {
            periods,
            paths: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(periods: usize, trials: usize) -> Self {
        Self {
            periods,
            paths: Vec::with_capacity(trials),
        }
    }

    /// Append the running sum of a return path
    pub fn push_returns(&mut self, returns: &[f64]) {
        debug_assert_eq!(returns.len(), self.periods);
        let mut total = 0.0;
        self.paths.push(
            returns
                .iter()
                .map(|r| {
                    total += r;
                    total
                })
                .collect(),
        );
    }

    /// Concatenate another matrix built over the same number of periods
    pub fn extend(&mut self, other: PathMatrix) {
        debug_assert_eq!(other.periods, self.periods);
        self.paths.extend(other.paths);
    }

    #[must_use]
    pub fn periods(&self) -> usize {
        self.periods
    }

    #[must_use]
    pub fn num_paths(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn paths(&self) -> &[Vec<f64>] {
        &self.paths
    }

    /// Up to `k` paths, in trial order
    #[must_use]
    pub fn sample_paths(&self, k: usize) -> &[Vec<f64>] {
        &self.paths[..k.min(self.paths.len())]
    }

    /// Per-period percentile curves across all paths
    pub fn bands(&self, quantiles: &[f64]) -> Result<Vec<PercentileBand>, AggregationError> {
        if self.paths.is_empty() {
            return Err(AggregationError::EmptySample);
        }
        let mut bands: Vec<PercentileBand> = quantiles
            .iter()
            .map(|&quantile| PercentileBand {
                quantile,
                values: Vec::with_capacity(self.periods),
            })
            .collect();

        let mut column = Vec::with_capacity(self.paths.len());
        for t in 0..self.periods {
            column.clear();
            column.extend(self.paths.iter().map(|p| p[t]));
            column.sort_by(f64::total_cmp);
            for band in &mut bands {
                band.values
                    .push(stats::percentile_sorted(&column, band.quantile)?);
            }
        }
        Ok(bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_accumulates() {
        let mut m = PathMatrix::new(3);
        m.push_returns(&[1.0, -2.0, 4.0]);
        assert_eq!(m.paths()[0], vec![1.0, -1.0, 3.0]);
    }

    #[test]
    fn test_bands() {
        let mut m = PathMatrix::new(2);
        m.push_returns(&[1.0, 1.0]);
        m.push_returns(&[2.0, 2.0]);
        m.push_returns(&[3.0, 3.0]);

        let bands = m.bands(&[0.0, 50.0, 100.0]).unwrap();
        assert_eq!(bands[0].values, vec![1.0, 2.0]);
        assert_eq!(bands[1].values, vec![2.0, 4.0]);
        assert_eq!(bands[2].values, vec![3.0, 6.0]);
    }

    #[test]
    fn test_sample_paths_caps_at_len() {
        let mut m = PathMatrix::new(1);
        m.push_returns(&[1.0]);
        assert_eq!(m.sample_paths(SAMPLE_PATHS).len(), 1);
        assert!(PathMatrix::new(1).bands(&BAND_QUANTILES).is_err());
    }
}
