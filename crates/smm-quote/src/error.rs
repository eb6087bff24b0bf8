//! Quote generation error types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    /// Bad generator name or parameters. Fatal.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unusable skew/spread/snapshot for this tick.
    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    /// NaN, infinite or non-positive price/size produced by the ladder math.
    #[error("Computation fault: {0}")]
    ComputationFault(String),
}

impl QuoteError {
    /// Whether the tick can be skipped and quoting continued.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::InvalidSignal(_) => "invalid_signal",
            Self::ComputationFault(_) => "computation_fault",
        }
    }
}

pub type QuoteResult<T> = Result<T, QuoteError>;
