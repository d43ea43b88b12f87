//! Performance metrics of a single return path.
//!
//! A path is judged on its *cumulative series*: initial capital plus the running
//! sum of the per-period returns. Degenerate arithmetic never errors; each
//! metric documents the sentinel it resolves to.

use crate::config::{PERIODS_PER_YEAR, SHARPE_SCALE, SharpeVariant};
use crate::model::MetricVector;

/// Initial capital plus the running sum of `returns`
#[must_use]
pub fn cumulative_series(initial_capital: f64, returns: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    returns
        .iter()
        .map(|r| {
            total += r;
            initial_capital + total
        })
        .collect()
}

/// Strictly positive periods over non-zero periods; 0 when every period is zero.
#[must_use]
pub fn win_probability(returns: &[f64]) -> f64 {
    let wins = returns.iter().filter(|&&r| r > 0.0).count();
    let non_zero = returns.iter().filter(|&&r| r != 0.0).count();
    if non_zero == 0 {
        0.0
    } else {
        wins as f64 / non_zero as f64
    }
}

fn mean_where(returns: &[f64], keep: impl Fn(f64) -> bool) -> Option<f64> {
    let (sum, count) = returns
        .iter()
        .filter(|&&r| keep(r))
        .fold((0.0, 0usize), |(s, c), r| (s + r, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Average gain over the absolute average loss.
///
/// Empty sides average to 0. No losses gives `+inf` when there are gains and 0
/// when there are none.
#[must_use]
pub fn profit_loss_ratio(returns: &[f64]) -> f64 {
    let avg_profit = mean_where(returns, |r| r > 0.0).unwrap_or(0.0);
    let avg_loss = mean_where(returns, |r| r < 0.0).unwrap_or(0.0);
    if avg_loss != 0.0 {
        avg_profit / avg_loss.abs()
    } else if avg_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Mean over population standard deviation; `+inf` for a flat path.
#[must_use]
pub fn sharpe_ratio(returns: &[f64], variant: SharpeVariant) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let n = returns.len() as f64;
    let mean_all = returns.iter().sum::<f64>() / n;
    let std_dev = (returns.iter().map(|r| (r - mean_all).powi(2)).sum::<f64>() / n).sqrt();
    if std_dev == 0.0 {
        return f64::INFINITY;
    }

    match variant {
        // std_dev > 0 implies at least one non-zero period
        SharpeVariant::NonZeroMean => {
            mean_where(returns, |r| r != 0.0).unwrap_or(0.0) / std_dev
        }
        SharpeVariant::Annualized => mean_all / std_dev * SHARPE_SCALE,
    }
}

/// Compound annual growth over `periods / 252` years; 0 unless the path ends above
/// its starting capital.
#[must_use]
pub fn cagr(terminal: f64, initial_capital: f64, periods: usize) -> f64 {
    if periods == 0 || terminal <= initial_capital {
        return 0.0;
    }
    let years = periods as f64 / PERIODS_PER_YEAR;
    (terminal / initial_capital).powf(1.0 / years) - 1.0
}

/// Peak-relative decline statistics of a cumulative series
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Drawdown {
    /// Largest (peak - value) / peak; steps at a zero peak count as 0
    pub max_fraction: f64,
    /// Largest peak - value, in currency
    pub max_amount: f64,
    /// Longest run of periods strictly below the running peak
    pub max_underwater: usize,
}

impl Drawdown {
    /// Single pass over the cumulative values
    #[must_use]
    pub fn of(cumulative: &[f64]) -> Self {
        let Some(&first) = cumulative.first() else {
            return Self::default();
        };

        let mut peak = first;
        let mut max_fraction = f64::NEG_INFINITY;
        let mut max_amount = f64::NEG_INFINITY;
        let mut run = 0usize;
        let mut max_underwater = 0usize;

        for &value in cumulative {
            peak = peak.max(value);
            let amount = peak - value;
            let fraction = if peak == 0.0 { 0.0 } else { amount / peak };
            max_fraction = max_fraction.max(fraction);
            max_amount = max_amount.max(amount);

            if amount > 0.0 {
                run += 1;
                max_underwater = max_underwater.max(run);
            } else {
                run = 0;
            }
        }

        Self {
            max_fraction,
            max_amount,
            max_underwater,
        }
    }
}

/// Maximum drawdown of a cumulative series, as a fraction of the running peak
#[must_use]
pub fn max_drawdown(cumulative: &[f64]) -> f64 {
    Drawdown::of(cumulative).max_fraction
}

/// Longest contiguous run of periods below the running peak
#[must_use]
pub fn max_underwater_duration(cumulative: &[f64]) -> usize {
    Drawdown::of(cumulative).max_underwater
}

/// Terminal value over the largest currency drawdown; `+inf` without a drawdown.
#[must_use]
pub fn reward_ratio(terminal: f64, drawdown: &Drawdown) -> f64 {
    if drawdown.max_fraction != 0.0 {
        terminal / drawdown.max_amount.abs()
    } else {
        f64::INFINITY
    }
}

/// Computes the full [`MetricVector`] for paths started from one capital
#[derive(Debug, Clone, Copy)]
pub struct PathMetrics {
    initial_capital: f64,
    sharpe: SharpeVariant,
}

impl PathMetrics {
    #[must_use]
    pub fn new(initial_capital: f64, sharpe: SharpeVariant) -> Self {
        Self {
            initial_capital,
            sharpe,
        }
    }

    #[must_use]
    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    /// Metrics of `returns` given its precomputed cumulative series
    #[must_use]
    pub fn from_cumulative(&self, returns: &[f64], cumulative: &[f64]) -> MetricVector {
        debug_assert_eq!(returns.len(), cumulative.len());
        let terminal = cumulative.last().copied().unwrap_or(self.initial_capital);
        let drawdown = Drawdown::of(cumulative);

        MetricVector {
            terminal_pnl: terminal,
            win_probability: win_probability(returns),
            profit_loss_ratio: profit_loss_ratio(returns),
            sharpe_ratio: sharpe_ratio(returns, self.sharpe),
            cagr: cagr(terminal, self.initial_capital, returns.len()),
            max_drawdown: drawdown.max_fraction,
            max_underwater: drawdown.max_underwater,
            reward_ratio: reward_ratio(terminal, &drawdown),
        }
    }

    /// Metrics of a return path; the cumulative series is built and dropped here
    #[must_use]
    pub fn compute(&self, returns: &[f64]) -> MetricVector {
        let cumulative = cumulative_series(self.initial_capital, returns);
        self.from_cumulative(returns, &cumulative)
    }
}
