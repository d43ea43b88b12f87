//! Fluent builder for [`SimulationConfig`]

use super::{PresentationMode, SharpeVariant, SimulationConfig};
use crate::error::InputError;

/// Builder with validation at `build()`
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    config: SimulationConfig,
}

impl SimulationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn initial_capital(mut self, capital: f64) -> Self {
        self.config.initial_capital = capital;
        self
    }

    #[must_use]
    pub fn trials(mut self, n: usize) -> Self {
        self.config.trial_count = n;
        self
    }

    #[must_use]
    pub fn confidence(mut self, level: f64) -> Self {
        self.config.confidence = level;
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: PresentationMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Seven percentile columns with the non-zero-mean Sharpe
    #[must_use]
    pub fn classic(self) -> Self {
        self.mode(PresentationMode::Classic)
    }

    /// Nine percentile columns with the annualized Sharpe
    #[must_use]
    pub fn extended(self) -> Self {
        self.mode(PresentationMode::Extended)
    }

    #[must_use]
    pub fn sharpe(mut self, variant: SharpeVariant) -> Self {
        self.config.sharpe = Some(variant);
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn retain_paths(mut self, retain: bool) -> Self {
        self.config.retain_paths = retain;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, InputError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
