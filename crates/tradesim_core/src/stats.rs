//! Order-independent summary statistics over per-trial metric values.
//!
//! Everything here works on a sorted copy of the sample, so permuting the
//! input never changes a result, not even in the last bit.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::AggregationError;
use crate::model::ConfidenceInterval;

/// Sort a copy of the sample ascending (`+inf` last).
#[must_use]
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Arithmetic mean of an ascending-sorted sample.
pub fn mean_sorted(sorted: &[f64]) -> Result<f64, AggregationError> {
    if sorted.is_empty() {
        return Err(AggregationError::EmptySample);
    }
    Ok(sorted.iter().sum::<f64>() / sorted.len() as f64)
}

/// Arithmetic mean of an unsorted sample.
pub fn mean(values: &[f64]) -> Result<f64, AggregationError> {
    mean_sorted(&sorted(values))
}

/// Percentile of an ascending-sorted sample, `q` in [0, 100].
///
/// Linear interpolation between the two closest ranks. When either neighbour is
/// infinite the interpolation never forms `inf - inf`.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Result<f64, AggregationError> {
    if sorted.is_empty() {
        return Err(AggregationError::EmptySample);
    }
    let rank = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    let (a, b) = (sorted[lo], sorted[hi]);
    if frac == 0.0 || a == b {
        return Ok(a);
    }
    if b.is_infinite() {
        return Ok(b);
    }
    Ok(a + (b - a) * frac)
}

/// Percentiles of an unsorted sample at each of `quantiles`.
pub fn percentiles(values: &[f64], quantiles: &[f64]) -> Result<Vec<f64>, AggregationError> {
    let sorted = sorted(values);
    quantiles
        .iter()
        .map(|&q| percentile_sorted(&sorted, q))
        .collect()
}

/// Sample standard deviation (N - 1 denominator) of an ascending-sorted sample.
pub fn sample_std_dev_sorted(sorted: &[f64]) -> Result<f64, AggregationError> {
    if sorted.len() < 2 {
        return Err(AggregationError::InsufficientTrials {
            trials: sorted.len(),
        });
    }
    let mean = mean_sorted(sorted)?;
    let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
    Ok((ss / (sorted.len() - 1) as f64).sqrt())
}

/// Standard error of the mean of an ascending-sorted sample.
pub fn standard_error_sorted(sorted: &[f64]) -> Result<f64, AggregationError> {
    Ok(sample_std_dev_sorted(sorted)? / (sorted.len() as f64).sqrt())
}

/// Two-sided Student's-t critical value for `confidence` with `df` degrees of freedom.
pub fn t_critical(confidence: f64, df: usize) -> Result<f64, AggregationError> {
    if df == 0 {
        return Err(AggregationError::InsufficientTrials { trials: 1 });
    }
    let dist = StudentsT::new(0.0, 1.0, df as f64)
        .map_err(|e| AggregationError::Distribution(e.to_string()))?;
    Ok(dist.inverse_cdf((1.0 + confidence) / 2.0))
}

/// Confidence interval of the mean of an ascending-sorted sample:
/// `mean ± t(confidence, N - 1) × SEM`.
///
/// A non-finite mean (some trial hit `+inf`) gives the degenerate interval `[mean, mean]`.
pub fn confidence_interval_sorted(
    sorted: &[f64],
    confidence: f64,
) -> Result<ConfidenceInterval, AggregationError> {
    let n = sorted.len();
    if n < 2 {
        return Err(AggregationError::InsufficientTrials { trials: n });
    }
    let mean = mean_sorted(sorted)?;
    if !mean.is_finite() {
        return Ok(ConfidenceInterval {
            confidence,
            low: mean,
            high: mean,
        });
    }

    let sem = standard_error_sorted(sorted)?;
    let half_width = sem * t_critical(confidence, n - 1)?;
    Ok(ConfidenceInterval {
        confidence,
        low: mean - half_width,
        high: mean + half_width,
    })
}

/// Confidence interval of the mean of an unsorted sample.
pub fn confidence_interval(
    values: &[f64],
    confidence: f64,
) -> Result<ConfidenceInterval, AggregationError> {
    confidence_interval_sorted(&sorted(values), confidence)
}
