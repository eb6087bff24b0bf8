//! Stinky quote generator.
//!
//! Rests a deep ladder well away from mid to catch wicks. Level distances
//! are measured in price units from mid:
//!
//! ```text
//! inner = corrected_spread * depth_multiplier
//! outer = inner * range_multiplier
//! d(i)  = inner + t^level_exponent * (outer - inner),  t = i / (n - 1)
//! ```
//!
//! Inventory widens the side that would add to the position; prediction
//! skew tightens the side it favours. Outer levels carry more size.

use smm_core::{MarketSnapshot, QuoteLadder};

use crate::config::{StinkyParams, StrategyParams};
use crate::correction::{bps_to_decimal, clip, corrected_spread};
use crate::error::QuoteResult;
use crate::generator::{validate_signal, QuoteGenerator};
use crate::ladder::assemble_ladder;

#[derive(Debug, Clone)]
pub struct StinkyQuoteGenerator {
    params: StrategyParams,
    stinky: StinkyParams,
}

impl StinkyQuoteGenerator {
    pub fn new(params: StrategyParams, stinky: StinkyParams) -> QuoteResult<Self> {
        params.validate()?;
        stinky.validate()?;
        Ok(Self { params, stinky })
    }

    /// Unskewed distance of level `i` from mid.
    fn base_distance(&self, spread: f64, level: usize, levels: usize) -> f64 {
        let inner = spread * self.stinky.depth_multiplier;
        if levels <= 1 {
            return inner;
        }
        let outer = inner * self.stinky.range_multiplier;
        let t = level as f64 / (levels - 1) as f64;
        inner + t.powf(self.stinky.level_exponent) * (outer - inner)
    }

    /// Size of level `i`. A single level gets the flat base size.
    fn level_size(&self, level: usize, levels: usize) -> f64 {
        let base = self.params.max_position / levels as f64;
        if levels <= 1 {
            return base;
        }
        let t = level as f64 / (levels - 1) as f64;
        let multiplier = self.stinky.size_min_multiplier
            + (self.stinky.size_max_multiplier - self.stinky.size_min_multiplier) * t;
        base * multiplier
    }
}

impl QuoteGenerator for StinkyQuoteGenerator {
    fn name(&self) -> &'static str {
        "stinky"
    }

    fn generate_quotes(
        &self,
        snapshot: &MarketSnapshot,
        skew: f64,
        spread: f64,
    ) -> QuoteResult<QuoteLadder> {
        validate_signal(&self.params, snapshot, skew, spread)?;
        let spread = corrected_spread(spread, self.params.minimum_spread);
        let min_distance = bps_to_decimal(self.params.minimum_spread) / 2.0;
        let levels = self.params.levels_per_side();

        // Long inventory: widen bids (buy less eagerly), tighten asks.
        let inv_skew = self.stinky.inventory_skew_factor * clip(snapshot.inventory_delta, -1.0, 1.0);
        // Positive prediction: tighten bids, widen asks.
        let pred_skew = self.stinky.skew_factor * clip(skew, -1.0, 1.0);

        let mut bid_prices = Vec::with_capacity(levels);
        let mut ask_prices = Vec::with_capacity(levels);
        let mut sizes = Vec::with_capacity(levels);

        for level in 0..levels {
            let base = self.base_distance(spread, level, levels);

            let bid_distance = (base * (1.0 + inv_skew) * (1.0 - pred_skew)).max(min_distance);
            let ask_distance = (base * (1.0 - inv_skew) * (1.0 + pred_skew)).max(min_distance);

            bid_prices.push(snapshot.mid - bid_distance);
            ask_prices.push(snapshot.mid + ask_distance);
            sizes.push(self.level_size(level, levels));
        }

        assemble_ladder(&bid_prices, &sizes, &ask_prices, &sizes, &snapshot.instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use rust_decimal_macros::dec;
    use smm_core::{InstrumentSpec, Price, Side, Size};

    fn snapshot(mid: f64, inventory_delta: f64) -> MarketSnapshot {
        MarketSnapshot {
            mid,
            inventory_delta,
            instrument: InstrumentSpec::new(Price::new(dec!(0.01)), Size::new(dec!(0.001))),
            ..MarketSnapshot::empty()
        }
    }

    fn generator(total_orders: u32, stinky: StinkyParams) -> StinkyQuoteGenerator {
        StinkyQuoteGenerator::new(
            StrategyParams {
                minimum_spread: 100.0, // floor 0.01, cap 0.05
                total_orders,
                max_position: 3.0,
                ..Default::default()
            },
            stinky,
        )
        .unwrap()
    }

    #[test]
    fn test_symmetric_single_level() {
        let gen = generator(2, StinkyParams::default());
        // spread 0.05 (cap), inner = 0.15
        let ladder = gen.generate_quotes(&snapshot(100.003, 0.0), 0.0, 0.05).unwrap();
        let q = ladder.as_slice();
        assert_eq!(q.len(), 2);
        assert_eq!(q[0].price, Price::new(dec!(99.85)));
        assert_eq!(q[1].price, Price::new(dec!(100.16)));
        assert_eq!(q[0].size, Size::new(dec!(3)));
    }

    #[test]
    fn test_quadratic_level_distribution() {
        let gen = generator(6, StinkyParams::default());
        // inner 0.15, outer 0.45, t = 0, 0.5, 1 -> 0.15, 0.225, 0.45
        assert!((gen.base_distance(0.05, 0, 3) - 0.15).abs() < 1e-12);
        assert!((gen.base_distance(0.05, 1, 3) - 0.225).abs() < 1e-12);
        assert!((gen.base_distance(0.05, 2, 3) - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_convex_sizes() {
        let gen = generator(6, StinkyParams::default());
        // base 1.0 x [0.5, 1.0, 1.5]
        let sizes: Vec<f64> = (0..3).map(|i| gen.level_size(i, 3)).collect();
        assert_eq!(sizes, vec![0.5, 1.0, 1.5]);

        let ladder = gen.generate_quotes(&snapshot(100.0, 0.0), 0.0, 0.05).unwrap();
        let bid_sizes: Vec<Size> = ladder.bids().map(|q| q.size).collect();
        assert_eq!(
            bid_sizes,
            vec![Size::new(dec!(0.5)), Size::new(dec!(1.0)), Size::new(dec!(1.5))]
        );
    }

    #[test]
    fn test_inventory_long_widens_bids() {
        let stinky = StinkyParams {
            skew_factor: 0.0,
            ..Default::default()
        };
        let gen = generator(2, stinky);
        let ladder = gen.generate_quotes(&snapshot(100.0, 1.0), 0.0, 0.05).unwrap();
        let q = ladder.as_slice();
        // bid distance 0.15 * 1.3 = 0.195, ask 0.15 * 0.7 = 0.105
        assert_eq!(q[0].price, Price::new(dec!(99.80)));
        assert_eq!(q[1].price, Price::new(dec!(100.11)));
    }

    #[test]
    fn test_prediction_skew_tightens_bids() {
        let stinky = StinkyParams {
            inventory_skew_factor: 0.0,
            ..Default::default()
        };
        let gen = generator(2, stinky);
        let up = gen.generate_quotes(&snapshot(100.0, 0.0), 1.0, 0.05).unwrap();
        let flat = gen.generate_quotes(&snapshot(100.0, 0.0), 0.0, 0.05).unwrap();
        assert!(up.best_bid().unwrap() > flat.best_bid().unwrap());
        assert!(up.best_ask().unwrap() > flat.best_ask().unwrap());
    }

    #[test]
    fn test_distance_floor() {
        let stinky = StinkyParams {
            inventory_skew_factor: 2.0,
            skew_factor: 0.0,
            ..Default::default()
        };
        let gen = generator(2, stinky);
        // ask distance 0.15 * (1 - 2) < 0, floored at 0.005
        let ladder = gen.generate_quotes(&snapshot(100.0, 1.0), 0.0, 0.05).unwrap();
        assert_eq!(ladder.best_ask(), Some(Price::new(dec!(100.01))));
        assert!(ladder.best_ask().unwrap().to_f64() > 100.0);
    }

    #[test]
    fn test_alternation_and_monotone_distance() {
        let gen = generator(10, StinkyParams::default());
        let ladder = gen.generate_quotes(&snapshot(2500.0, 0.2), -0.4, 3.0).unwrap();
        assert_eq!(ladder.len(), 10);
        for (i, quote) in ladder.iter().enumerate() {
            assert_eq!(quote.side, if i % 2 == 0 { Side::Bid } else { Side::Ask });
        }
        let bids: Vec<Price> = ladder.bids().map(|q| q.price).collect();
        let asks: Vec<Price> = ladder.asks().map(|q| q.price).collect();
        for pair in bids.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        for pair in asks.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_invalid_signal_rejected() {
        let gen = generator(4, StinkyParams::default());
        let result = gen.generate_quotes(&snapshot(100.0, 0.0), 0.0, -1.0);
        assert!(matches!(result, Err(QuoteError::InvalidSignal(_))));
    }

    #[test]
    fn test_invalid_stinky_params_rejected() {
        let result = StinkyQuoteGenerator::new(
            StrategyParams::default(),
            StinkyParams {
                depth_multiplier: 0.0,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(QuoteError::Configuration(_))));
    }
}
