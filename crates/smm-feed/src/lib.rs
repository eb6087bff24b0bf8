//! Market state for smm.
//!
//! The feed collaborator publishes mid price, inventory, instrument spec and
//! collection sizes into a `MarketState`; the strategy loop reads versioned
//! `MarketSnapshot` copies through the `MarketDataStore` trait and gates
//! quoting on `WarmupRequirements`.

pub mod error;
pub mod market_state;
pub mod warmup;

pub use error::{FeedError, FeedResult};
pub use market_state::{MarketDataStore, MarketState};
pub use warmup::{WarmupProgress, WarmupRequirements};
