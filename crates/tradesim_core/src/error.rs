use std::fmt;

/// Errors raised while validating return data and run parameters
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// Fewer usable return values than a drawdown/Sharpe computation needs
    TooFewReturns { found: usize, required: usize },
    /// A return value was NaN or infinite
    NonFiniteReturn { index: usize, value: f64 },
    /// Initial capital must be finite and strictly positive
    InvalidInitialCapital(f64),
    /// Trial count must be at least one
    ZeroTrials,
    /// Confidence level must lie strictly between 0 and 1
    InvalidConfidence(f64),
    /// Tabular source did not have the returns column
    MissingColumn { columns: usize },
    /// Free-form parse failure from an outer loader
    Parse(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::TooFewReturns { found, required } => {
                write!(f, "need at least {required} return values, found {found}")
            }
            InputError::NonFiniteReturn { index, value } => {
                write!(f, "return at position {index} is not finite ({value})")
            }
            InputError::InvalidInitialCapital(value) => {
                write!(f, "initial capital must be a positive number, got {value}")
            }
            InputError::ZeroTrials => write!(f, "trial count must be at least 1"),
            InputError::InvalidConfidence(level) => {
                write!(f, "confidence level must be in (0, 1), got {level}")
            }
            InputError::MissingColumn { columns } => write!(
                f,
                "the data must contain at least two columns, found {columns}"
            ),
            InputError::Parse(msg) => write!(f, "could not parse input: {msg}"),
        }
    }
}

impl std::error::Error for InputError {}

/// Errors raised while summarizing per-trial metric vectors
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationError {
    /// A confidence interval needs at least two trials (N - 1 degrees of freedom)
    InsufficientTrials { trials: usize },
    /// Mean or percentile requested over an empty vector
    EmptySample,
    /// The t-distribution could not be constructed
    Distribution(String),
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationError::InsufficientTrials { trials } => write!(
                f,
                "confidence interval requires at least 2 trials, got {trials}"
            ),
            AggregationError::EmptySample => write!(f, "cannot aggregate an empty sample"),
            AggregationError::Distribution(msg) => {
                write!(f, "t-distribution unavailable: {msg}")
            }
        }
    }
}

impl std::error::Error for AggregationError {}

/// Top-level error for a simulation request
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Input(InputError),
    Aggregation(AggregationError),
    /// Monte Carlo simulation was cancelled by user request
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Input(e) => write!(f, "invalid input: {e}"),
            SimulationError::Aggregation(e) => write!(f, "aggregation failed: {e}"),
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Input(e) => Some(e),
            SimulationError::Aggregation(e) => Some(e),
            SimulationError::Cancelled => None,
        }
    }
}

impl From<InputError> for SimulationError {
    fn from(err: InputError) -> Self {
        SimulationError::Input(err)
    }
}

impl From<AggregationError> for SimulationError {
    fn from(err: AggregationError) -> Self {
        SimulationError::Aggregation(err)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
