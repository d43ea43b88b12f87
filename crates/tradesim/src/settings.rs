//! Run settings: an optional YAML file overlaid by command-line values.
//!
//! The file holds a serialized [`SimulationConfig`]; any field it leaves out
//! keeps its default. Command-line values win over the file.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use tradesim_core::config::{PresentationMode, SharpeVariant, SimulationConfig};

const CONFIG_FILE: &str = "config.yaml";

/// `~/.config/tradesim/config.yaml` or the platform equivalent
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tradesim").join(CONFIG_FILE))
}

pub fn parse_config(yaml: &str) -> Result<SimulationConfig, serde_saphyr::Error> {
    serde_saphyr::from_str(yaml)
}

/// Read the explicit file, else the default file if present, else defaults.
pub fn load_config(explicit: Option<&Path>) -> color_eyre::Result<SimulationConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path,
            None => return Ok(SimulationConfig::default()),
        },
    };

    let content = fs::read_to_string(&path)
        .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
    let config = parse_config(&content)
        .wrap_err_with(|| format!("Failed to parse config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded settings file");
    Ok(config)
}

/// Command-line values that replace file settings when present
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub initial_capital: Option<f64>,
    pub trial_count: Option<usize>,
    pub confidence: Option<f64>,
    pub mode: Option<PresentationMode>,
    pub sharpe: Option<SharpeVariant>,
    pub seed: Option<u64>,
    pub retain_paths: bool,
}

impl Overrides {
    #[must_use]
    pub fn apply(&self, mut config: SimulationConfig) -> SimulationConfig {
        if let Some(capital) = self.initial_capital {
            config.initial_capital = capital;
        }
        if let Some(n) = self.trial_count {
            config.trial_count = n;
        }
        if let Some(level) = self.confidence {
            config.confidence = level;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.sharpe.is_some() {
            config.sharpe = self.sharpe;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.retain_paths |= self.retain_paths;
        config
    }
}

pub fn parse_mode(s: &str) -> Result<PresentationMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "classic" => Ok(PresentationMode::Classic),
        "extended" => Ok(PresentationMode::Extended),
        other => Err(format!("unknown mode '{other}' (expected classic or extended)")),
    }
}

pub fn parse_sharpe(s: &str) -> Result<SharpeVariant, String> {
    match s.to_ascii_lowercase().replace('-', "_").as_str() {
        "non_zero_mean" | "nonzero" => Ok(SharpeVariant::NonZeroMean),
        "annualized" => Ok(SharpeVariant::Annualized),
        other => Err(format!(
            "unknown sharpe variant '{other}' (expected non-zero-mean or annualized)"
        )),
    }
}
