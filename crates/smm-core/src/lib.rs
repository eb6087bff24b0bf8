//! Core domain types for the smm quoting engine.
//!
//! This crate provides the value types shared by every other crate:
//! - `Price`, `Size`: Precision-safe numeric types with tick/lot rounding
//! - `InstrumentSpec`: Exchange rounding granularities
//! - `MarketSnapshot`: Versioned copy of the externally-fed market state
//! - `Quote`, `QuoteLadder`: The output of a quote generator

pub mod decimal;
pub mod error;
pub mod market;
pub mod order;
pub mod quote;
pub mod types;

pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use market::InstrumentSpec;
pub use order::{OrderType, Side};
pub use quote::{Quote, QuoteLadder};
pub use types::MarketSnapshot;
