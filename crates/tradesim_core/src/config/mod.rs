//! Simulation configuration
//!
//! The main configuration type is `SimulationConfig`, which contains everything
//! needed to run a simulation besides the return data and the randomness source.
//!
//! # Builder DSL
//!
//! ```ignore
//! use tradesim_core::config::SimulationBuilder;
//!
//! let config = SimulationBuilder::new()
//!     .initial_capital(4_000.0)
//!     .trials(1_000)
//!     .classic()
//!     .seed(42)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::InputError;

pub mod builder;

pub use builder::SimulationBuilder;

/// Trading periods per year used for CAGR and Sharpe annualization
pub const PERIODS_PER_YEAR: f64 = 252.0;

/// Scale applied by [`SharpeVariant::Annualized`]: √(252 / 12)
pub const SHARPE_SCALE: f64 = 4.582_575_694_955_84;

fn default_initial_capital() -> f64 {
    4_000.0
}

fn default_trial_count() -> usize {
    1_000
}

fn default_confidence() -> f64 {
    0.95
}

/// Which report layout the summaries are built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// 5..95 percentile columns, Sharpe on non-zero periods
    Classic,
    /// 1..99 percentile columns, annualized Sharpe
    #[default]
    Extended,
}

impl PresentationMode {
    /// Percentile columns reported for every metric
    #[must_use]
    pub fn quantiles(&self) -> &'static [f64] {
        match self {
            Self::Classic => &[5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0],
            Self::Extended => &[1.0, 5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0, 99.0],
        }
    }

    #[must_use]
    pub fn default_sharpe(&self) -> SharpeVariant {
        match self {
            Self::Classic => SharpeVariant::NonZeroMean,
            Self::Extended => SharpeVariant::Annualized,
        }
    }
}

/// Numerator and scaling of the Sharpe-like ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharpeVariant {
    /// Mean of non-zero periods over std dev of all periods, unscaled
    NonZeroMean,
    /// Mean of all periods over std dev, scaled by √(252/12)
    Annualized,
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting capital the cumulative series is built on (same unit as returns)
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,

    /// Number of bootstrap trials
    #[serde(default = "default_trial_count")]
    pub trial_count: usize,

    /// Confidence level of the mean's interval
    #[serde(default = "default_confidence")]
    pub confidence: f64,

    #[serde(default)]
    pub mode: PresentationMode,

    /// Overrides the mode's default Sharpe variant
    #[serde(default)]
    pub sharpe: Option<SharpeVariant>,

    /// Seed for reproducible runs (None = OS entropy each run)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Keep the N × L cumulative path matrix for charting
    #[serde(default)]
    pub retain_paths: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
            trial_count: default_trial_count(),
            confidence: default_confidence(),
            mode: PresentationMode::default(),
            sharpe: None,
            seed: None,
            retain_paths: false,
        }
    }
}

impl SimulationConfig {
    /// Sharpe variant in effect for this run
    #[must_use]
    pub fn sharpe_variant(&self) -> SharpeVariant {
        self.sharpe.unwrap_or_else(|| self.mode.default_sharpe())
    }

    #[must_use]
    pub fn quantiles(&self) -> &'static [f64] {
        self.mode.quantiles()
    }

    /// Check the parameters that can be rejected before any trial runs.
    ///
    /// The trial-count lower bound for confidence intervals is checked by the engine.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(InputError::InvalidInitialCapital(self.initial_capital));
        }
        if self.trial_count == 0 {
            return Err(InputError::ZeroTrials);
        }
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(InputError::InvalidConfidence(self.confidence));
        }
        Ok(())
    }
}
