//! Strategy loop error types.

use smm_quote::QuoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Quote generation failed: {0}")]
    Quote(#[from] QuoteError),

    #[error("Warm-up timed out after {waited_ms}ms, still waiting on: {pending}")]
    WarmupTimeout { waited_ms: u64, pending: String },

    #[error("{count} consecutive computation faults, last: {last}")]
    FaultLimit { count: u32, last: QuoteError },
}

pub type StrategyResult<T> = Result<T, StrategyError>;
