//! Historical per-period return series

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Minimum number of periods for a meaningful drawdown/Sharpe computation
pub const MIN_RETURNS: usize = 2;

/// Validated, ordered sequence of historical per-period returns.
///
/// The values are P&L per period in the same unit as the initial capital
/// (points or currency), not percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ReturnSeries {
    values: Cow<'static, [f64]>,
}

impl ReturnSeries {
    /// Build a series from already-cleaned values.
    ///
    /// Fails if fewer than [`MIN_RETURNS`] values are given or any value is not finite.
    pub fn new(values: impl Into<Cow<'static, [f64]>>) -> Result<Self, InputError> {
        let values = values.into();
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InputError::NonFiniteReturn { index, value });
        }
        if values.len() < MIN_RETURNS {
            return Err(InputError::TooFewReturns {
                found: values.len(),
                required: MIN_RETURNS,
            });
        }
        Ok(Self { values })
    }

    /// Build a series from a column with gaps, dropping missing and NaN cells.
    pub fn from_optional<I>(cells: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values: Vec<f64> = cells
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        Self::new(values)
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of periods in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed series, kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Summary statistics of the historical returns.
    #[must_use]
    pub fn statistics(&self) -> ReturnStatistics {
        let n = self.values.len() as f64;
        let mean = self.values.iter().sum::<f64>() / n;
        let variance = self.values.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

        ReturnStatistics {
            mean,
            std_dev: variance.sqrt(),
            min: self.values.iter().copied().fold(f64::INFINITY, f64::min),
            max: self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            periods: self.values.len(),
            positive: self.values.iter().filter(|&&r| r > 0.0).count(),
            negative: self.values.iter().filter(|&&r| r < 0.0).count(),
            zero: self.values.iter().filter(|&&r| r == 0.0).count(),
        }
    }
}

impl TryFrom<Vec<f64>> for ReturnSeries {
    type Error = InputError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<ReturnSeries> for Vec<f64> {
    fn from(series: ReturnSeries) -> Self {
        series.values.into_owned()
    }
}

/// Descriptive statistics of a [`ReturnSeries`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatistics {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub periods: usize,
    pub positive: usize,
    pub negative: usize,
    pub zero: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_series() {
        assert_eq!(
            ReturnSeries::new(vec![1.0]),
            Err(InputError::TooFewReturns {
                found: 1,
                required: 2
            })
        );
        assert!(ReturnSeries::new(Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = ReturnSeries::new(vec![1.0, f64::INFINITY, 2.0]).unwrap_err();
        assert!(matches!(err, InputError::NonFiniteReturn { index: 1, .. }));
    }

    #[test]
    fn test_from_optional_drops_gaps() {
        let series =
            ReturnSeries::from_optional([Some(1.0), None, Some(f64::NAN), Some(-2.0)]).unwrap();
        assert_eq!(series.values(), &[1.0, -2.0]);

        let err = ReturnSeries::from_optional([Some(1.0), None]).unwrap_err();
        assert!(matches!(err, InputError::TooFewReturns { found: 1, .. }));
    }

    #[test]
    fn test_statistics() {
        let series = ReturnSeries::new(vec![1.0, -1.0, 0.0, 2.0]).unwrap();
        let stats = series.statistics();
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 2.0);
        assert_eq!((stats.positive, stats.negative, stats.zero), (2, 1, 1));
        // population variance: (0.25 + 2.25 + 0.25 + 2.25) / 4 = 1.25
        assert!((stats.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_serde_validates() {
        let series: ReturnSeries = serde_json::from_str("[1.0, -0.5]").unwrap();
        assert_eq!(series.len(), 2);
        assert!(serde_json::from_str::<ReturnSeries>("[1.0]").is_err());
    }
}
