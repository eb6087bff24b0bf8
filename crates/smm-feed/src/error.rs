//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
