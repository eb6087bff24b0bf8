//! Warm-up readiness.
//!
//! Quoting may start only once the feed has filled its buffers far enough
//! for the feature engine to produce meaningful signals. Four conditions
//! are evaluated against a single snapshot:
//! - trade history length
//! - OHLCV bar count
//! - at least one ticker entry
//! - tick and lot sizes loaded

use serde::{Deserialize, Serialize};
use smm_core::MarketSnapshot;

/// Minimum collection sizes before quoting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarmupRequirements {
    /// Minimum trades in the feed's history buffer.
    #[serde(default = "default_min_trades")]
    pub min_trades: usize,

    /// Minimum OHLCV bars.
    #[serde(default = "default_min_ohlcv")]
    pub min_ohlcv: usize,

    /// Minimum ticker entries.
    #[serde(default = "default_min_tickers")]
    pub min_tickers: usize,
}

impl Default for WarmupRequirements {
    fn default() -> Self {
        Self {
            min_trades: default_min_trades(),
            min_ohlcv: default_min_ohlcv(),
            min_tickers: default_min_tickers(),
        }
    }
}

fn default_min_trades() -> usize {
    100
}
fn default_min_ohlcv() -> usize {
    100
}
fn default_min_tickers() -> usize {
    1
}

impl WarmupRequirements {
    /// Evaluate all conditions against one snapshot.
    pub fn check(&self, snapshot: &MarketSnapshot) -> WarmupProgress {
        WarmupProgress {
            trades_ready: snapshot.trade_count >= self.min_trades,
            ohlcv_ready: snapshot.ohlcv_count >= self.min_ohlcv,
            ticker_ready: snapshot.ticker_count >= self.min_tickers.max(1),
            instrument_ready: snapshot.instrument.is_loaded(),
        }
    }
}

/// Result of one warm-up poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupProgress {
    pub trades_ready: bool,
    pub ohlcv_ready: bool,
    pub ticker_ready: bool,
    pub instrument_ready: bool,
}

impl WarmupProgress {
    /// All conditions hold simultaneously.
    pub fn is_ready(&self) -> bool {
        self.trades_ready && self.ohlcv_ready && self.ticker_ready && self.instrument_ready
    }

    /// Names of the conditions still pending (for logging).
    pub fn pending(&self) -> Vec<&'static str> {
        let mut pending = Vec::new();
        if !self.trades_ready {
            pending.push("trades");
        }
        if !self.ohlcv_ready {
            pending.push("ohlcv");
        }
        if !self.ticker_ready {
            pending.push("ticker");
        }
        if !self.instrument_ready {
            pending.push("instrument");
        }
        pending
    }
}
