//! i.i.d. bootstrap resampling of a [`ReturnSeries`]

use rand::Rng;

use crate::error::InputError;
use crate::model::{MIN_RETURNS, ReturnSeries};

/// Draws synthetic paths of the same length as the history, each element an
/// independent uniform draw with replacement.
#[derive(Debug, Clone, Copy)]
pub struct Resampler<'a> {
    series: &'a ReturnSeries,
}

impl<'a> Resampler<'a> {
    pub fn new(series: &'a ReturnSeries) -> Result<Self, InputError> {
        if series.len() < MIN_RETURNS {
            return Err(InputError::TooFewReturns {
                found: series.len(),
                required: MIN_RETURNS,
            });
        }
        Ok(Self { series })
    }

    /// Length of every synthetic path
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.series.len()
    }

    /// Refill `buf` with a fresh synthetic path, reusing its allocation
    pub fn sample_path_into<R: Rng + ?Sized>(&self, rng: &mut R, buf: &mut Vec<f64>) {
        let values = self.series.values();
        buf.clear();
        buf.extend((0..values.len()).map(|_| values[rng.random_range(0..values.len())]));
    }

    pub fn sample_path<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let mut path = Vec::with_capacity(self.series.len());
        self.sample_path_into(rng, &mut path);
        path
    }

    /// `n` independent synthetic paths
    pub fn sample_paths<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n: usize,
    ) -> Result<Vec<Vec<f64>>, InputError> {
        if n == 0 {
            return Err(InputError::ZeroTrials);
        }
        Ok((0..n).map(|_| self.sample_path(rng)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_paths_have_history_length() {
        let series = ReturnSeries::new(vec![1.0, -1.0, 2.5, 0.0]).unwrap();
        let resampler = Resampler::new(&series).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let paths = resampler.sample_paths(&mut rng, 50).unwrap();
        assert_eq!(paths.len(), 50);
        for path in &paths {
            assert_eq!(path.len(), 4);
            assert!(path.iter().all(|v| series.values().contains(v)));
        }
    }

    #[test]
    fn test_zero_paths_rejected() {
        let series = ReturnSeries::new(vec![1.0, 2.0]).unwrap();
        let resampler = Resampler::new(&series).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            resampler.sample_paths(&mut rng, 0),
            Err(InputError::ZeroTrials)
        );
    }

    #[test]
    fn test_same_seed_same_path() {
        let series = ReturnSeries::new(vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let resampler = Resampler::new(&series).unwrap();
        let a = resampler.sample_path(&mut StdRng::seed_from_u64(11));
        let b = resampler.sample_path(&mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_draws_cover_all_values() {
        // 3000 draws over 3 values, roughly 1000 each
        let series = ReturnSeries::new(vec![-1.0, 0.0, 1.0]).unwrap();
        let resampler = Resampler::new(&series).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [0usize; 3];
        for _ in 0..1000 {
            for v in resampler.sample_path(&mut rng) {
                seen[(v + 1.0) as usize] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c > 500), "{seen:?}");
    }
}
