//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] smm_core::CoreError),

    #[error("Quote error: {0}")]
    Quote(#[from] smm_quote::QuoteError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] smm_strategy::StrategyError),
}

pub type AppResult<T> = Result<T, AppError>;
