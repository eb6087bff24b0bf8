//! Market snapshot.
//!
//! The feed mutates market state concurrently with the strategy loop.
//! Readers never see live fields; they get a `MarketSnapshot` value copied
//! under the store's lock, tagged with the version of the publish that
//! produced it. Two snapshots taken back to back may straddle a publish.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::InstrumentSpec;

/// Point-in-time copy of everything the quoting core reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Monotonic publish counter of the store this was read from.
    pub version: u64,
    /// Current mid price.
    pub mid: f64,
    /// Position normalised against max position.
    /// Negative = net short, positive = net long.
    pub inventory_delta: f64,
    /// Tick and lot sizes.
    pub instrument: InstrumentSpec,
    /// Trades held in the feed's history buffer.
    pub trade_count: usize,
    /// OHLCV bars held by the feed.
    pub ohlcv_count: usize,
    /// Ticker entries received.
    pub ticker_count: usize,
    /// When the snapshot was copied.
    pub captured_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Empty snapshot at version 0 (nothing published yet).
    pub fn empty() -> Self {
        Self {
            version: 0,
            mid: 0.0,
            inventory_delta: 0.0,
            instrument: InstrumentSpec::default(),
            trade_count: 0,
            ohlcv_count: 0,
            ticker_count: 0,
            captured_at: Utc::now(),
        }
    }

    /// Check the fields a quote generator relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.mid.is_finite() || self.mid <= 0.0 {
            return Err(CoreError::InvalidSnapshot(format!(
                "mid must be finite and positive, got {}",
                self.mid
            )));
        }
        if !self.inventory_delta.is_finite() {
            return Err(CoreError::InvalidSnapshot(format!(
                "inventory delta must be finite, got {}",
                self.inventory_delta
            )));
        }
        Ok(())
    }
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot_is_invalid() {
        let snap = MarketSnapshot::empty();
        assert_eq!(snap.version, 0);
        assert!(snap.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_nan_inventory() {
        let snap = MarketSnapshot {
            mid: 100.0,
            inventory_delta: f64::NAN,
            ..MarketSnapshot::empty()
        };
        assert!(matches!(
            snap.validate(),
            Err(CoreError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_validate_accepts_sane_snapshot() {
        let snap = MarketSnapshot {
            mid: 100.0,
            inventory_delta: -0.3,
            ..MarketSnapshot::empty()
        };
        assert!(snap.validate().is_ok());
    }
}
