//! Performance metrics computed for one return path

use serde::{Deserialize, Serialize};

/// How a metric value should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricUnit {
    /// Same unit as the initial capital
    Currency,
    /// Fraction in [0, 1] (rendered as a percentage)
    Fraction,
    /// Dimensionless ratio
    Ratio,
    /// Whole number of periods
    Periods,
}

/// The metrics tracked per path, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    TerminalPnl,
    WinProbability,
    ProfitLossRatio,
    SharpeRatio,
    Cagr,
    MaxDrawdown,
    MaxUnderwater,
    RewardRatio,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::TerminalPnl,
        Metric::WinProbability,
        Metric::ProfitLossRatio,
        Metric::SharpeRatio,
        Metric::Cagr,
        Metric::MaxDrawdown,
        Metric::MaxUnderwater,
        Metric::RewardRatio,
    ];

    /// Get a display label for the metric
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::TerminalPnl => "Final PnL",
            Self::WinProbability => "Win Rate",
            Self::ProfitLossRatio => "Profit/Loss Ratio",
            Self::SharpeRatio => "Sharpe Ratio",
            Self::Cagr => "CAGR",
            Self::MaxDrawdown => "Max Drawdown (MDD)",
            Self::MaxUnderwater => "Max Underwater Period",
            Self::RewardRatio => "Reward Ratio",
        }
    }

    #[must_use]
    pub fn unit(&self) -> MetricUnit {
        match self {
            Self::TerminalPnl => MetricUnit::Currency,
            Self::WinProbability | Self::Cagr | Self::MaxDrawdown => MetricUnit::Fraction,
            Self::ProfitLossRatio | Self::SharpeRatio | Self::RewardRatio => MetricUnit::Ratio,
            Self::MaxUnderwater => MetricUnit::Periods,
        }
    }

    /// Risk metrics report their percentiles worst-first.
    #[must_use]
    pub fn is_risk(&self) -> bool {
        matches!(self, Self::MaxDrawdown | Self::MaxUnderwater)
    }
}

/// The full metric set for one path.
///
/// Any ratio may be `f64::INFINITY` under its degenerate condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricVector {
    pub terminal_pnl: f64,
    pub win_probability: f64,
    pub profit_loss_ratio: f64,
    pub sharpe_ratio: f64,
    pub cagr: f64,
    pub max_drawdown: f64,
    pub max_underwater: usize,
    pub reward_ratio: f64,
}

impl MetricVector {
    /// Value of one metric as `f64`
    #[must_use]
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TerminalPnl => self.terminal_pnl,
            Metric::WinProbability => self.win_probability,
            Metric::ProfitLossRatio => self.profit_loss_ratio,
            Metric::SharpeRatio => self.sharpe_ratio,
            Metric::Cagr => self.cagr,
            Metric::MaxDrawdown => self.max_drawdown,
            Metric::MaxUnderwater => self.max_underwater as f64,
            Metric::RewardRatio => self.reward_ratio,
        }
    }
}
