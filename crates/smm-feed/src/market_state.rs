//! Versioned market state store.
//!
//! Each publish replaces fields under a single write lock and bumps the
//! version; each read copies the whole entry under the read lock. A
//! reader therefore never sees half of a publish, but consecutive reads
//! may see different versions.

use chrono::Utc;
use parking_lot::RwLock;
use smm_core::{InstrumentSpec, MarketSnapshot};
use tracing::debug;

use crate::error::{FeedError, FeedResult};

/// Read-only access to market state, as consumed by the strategy loop.
pub trait MarketDataStore: Send + Sync {
    /// Copy the current state.
    fn snapshot(&self) -> MarketSnapshot;
}

/// In-memory market state the feed publishes into.
#[derive(Debug)]
pub struct MarketState {
    entry: RwLock<MarketSnapshot>,
}

impl MarketState {
    /// Create an empty store at version 0.
    pub fn new() -> Self {
        Self {
            entry: RwLock::new(MarketSnapshot::empty()),
        }
    }

    /// Apply an arbitrary multi-field update atomically.
    ///
    /// Returns the new version.
    pub fn publish<F>(&self, f: F) -> u64
    where
        F: FnOnce(&mut MarketSnapshot),
    {
        let mut entry = self.entry.write();
        f(&mut entry);
        entry.version += 1;
        entry.version
    }

    /// Publish a new mid price.
    pub fn update_mid(&self, mid: f64) -> FeedResult<u64> {
        if !mid.is_finite() || mid <= 0.0 {
            return Err(FeedError::InvalidData(format!(
                "mid must be finite and positive, got {mid}"
            )));
        }
        Ok(self.publish(|s| s.mid = mid))
    }

    /// Publish a new normalised inventory.
    pub fn update_inventory_delta(&self, inventory_delta: f64) -> FeedResult<u64> {
        if !inventory_delta.is_finite() {
            return Err(FeedError::InvalidData(format!(
                "inventory delta must be finite, got {inventory_delta}"
            )));
        }
        Ok(self.publish(|s| s.inventory_delta = inventory_delta))
    }

    /// Publish mid and inventory together so a reader sees them as one version.
    pub fn update_mid_and_inventory(&self, mid: f64, inventory_delta: f64) -> FeedResult<u64> {
        if !mid.is_finite() || mid <= 0.0 || !inventory_delta.is_finite() {
            return Err(FeedError::InvalidData(format!(
                "invalid mid/inventory pair: mid={mid}, inventory_delta={inventory_delta}"
            )));
        }
        Ok(self.publish(|s| {
            s.mid = mid;
            s.inventory_delta = inventory_delta;
        }))
    }

    /// Publish exchange tick and lot sizes.
    pub fn set_instrument(&self, instrument: InstrumentSpec) -> u64 {
        debug!(
            tick_size = %instrument.tick_size,
            lot_size = %instrument.lot_size,
            "Instrument spec loaded"
        );
        self.publish(|s| s.instrument = instrument)
    }

    /// Publish the sizes of the feed's trade, OHLCV and ticker collections.
    pub fn update_counts(&self, trade_count: usize, ohlcv_count: usize, ticker_count: usize) -> u64 {
        self.publish(|s| {
            s.trade_count = trade_count;
            s.ohlcv_count = ohlcv_count;
            s.ticker_count = ticker_count;
        })
    }

    /// Current version without copying the entry.
    pub fn version(&self) -> u64 {
        self.entry.read().version
    }
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataStore for MarketState {
    fn snapshot(&self) -> MarketSnapshot {
        let mut snap = self.entry.read().clone();
        snap.captured_at = Utc::now();
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use smm_core::{Price, Size};
    use std::sync::Arc;

    #[test]
    fn test_new_store_is_empty() {
        let state = MarketState::new();
        let snap = state.snapshot();
        assert_eq!(snap.version, 0);
        assert_eq!(snap.trade_count, 0);
        assert!(!snap.instrument.is_loaded());
    }

    #[test]
    fn test_every_publish_bumps_version() {
        let state = MarketState::new();
        assert_eq!(state.update_mid(100.0).unwrap(), 1);
        assert_eq!(state.update_inventory_delta(0.2).unwrap(), 2);
        assert_eq!(state.update_counts(10, 5, 1), 3);
        assert_eq!(
            state.set_instrument(InstrumentSpec::new(
                Price::new(dec!(0.01)),
                Size::new(dec!(0.001))
            )),
            4
        );
        assert_eq!(state.version(), 4);

        let snap = state.snapshot();
        assert_eq!(snap.version, 4);
        assert_eq!(snap.mid, 100.0);
        assert_eq!(snap.inventory_delta, 0.2);
        assert_eq!(snap.ohlcv_count, 5);
    }

    #[test]
    fn test_rejects_invalid_mid() {
        let state = MarketState::new();
        assert!(state.update_mid(f64::NAN).is_err());
        assert!(state.update_mid(-1.0).is_err());
        assert!(state.update_mid(0.0).is_err());
        assert_eq!(state.version(), 0);
    }

    #[test]
    fn test_rejects_invalid_pair_without_partial_write() {
        let state = MarketState::new();
        state.update_mid(100.0).unwrap();
        assert!(state.update_mid_and_inventory(101.0, f64::INFINITY).is_err());

        let snap = state.snapshot();
        assert_eq!(snap.mid, 100.0);
        assert_eq!(snap.version, 1);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let state = MarketState::new();
        state.update_mid(100.0).unwrap();
        let before = state.snapshot();
        state.update_mid(105.0).unwrap();

        assert_eq!(before.mid, 100.0);
        assert_eq!(state.snapshot().mid, 105.0);
    }

    #[test]
    fn test_pair_update_is_single_version() {
        let state = Arc::new(MarketState::new());
        let writer = {
            let state = state.clone();
            std::thread::spawn(move || {
                for i in 1..=500 {
                    let x = i as f64;
                    state.update_mid_and_inventory(x, x / 1000.0).unwrap();
                }
            })
        };

        for _ in 0..500 {
            let snap = state.snapshot();
            if snap.version > 0 {
                assert!((snap.inventory_delta - snap.mid / 1000.0).abs() < 1e-12);
            }
        }
        writer.join().unwrap();
        assert_eq!(state.version(), 500);
    }
}
