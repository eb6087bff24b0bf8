//! Quote ladder generation for smm.
//!
//! Turns a (skew, spread) signal pair and a market snapshot into a
//! two-sided ladder of rounded limit quotes.
//!
//! # Architecture
//!
//! ```text
//! raw skew ─ corrected_skew(inventory) ─┐
//!                                       ├─ AnyQuoteGenerator::generate_quotes()
//! vol/spread ───────────────────────────┘    ├─ corrected_spread(minimum_spread)
//!                                            ├─ plain | stinky level construction
//!                                            └─ assemble_ladder(): tick/lot rounding
//!                                                 ↓
//!                                            QuoteLadder (bid, ask, bid, ask, ...)
//! ```
//!
//! Generators never apply inventory skew correction; the strategy loop
//! applies it exactly once per tick before calling them.

pub mod config;
pub mod correction;
pub mod error;
pub mod generator;
pub mod ladder;
pub mod plain;
pub mod stinky;

pub use config::{StinkyParams, StrategyParams};
pub use correction::{bps_to_decimal, corrected_skew, corrected_spread};
pub use error::{QuoteError, QuoteResult};
pub use generator::{AnyQuoteGenerator, GeneratorKind, QuoteGenerator};
pub use ladder::{assemble_ladder, geometric_weights, geomspace};
pub use plain::PlainQuoteGenerator;
pub use stinky::StinkyQuoteGenerator;
