//! Plain quote generator.
//!
//! Aggressiveness decides how strongly the directional skew pulls the best
//! quote on the favoured side toward mid:
//!
//! - skew > 0: best bid moves up toward mid, asks sit a full spread above it.
//!   Bid sizes are front-loaded, ask sizes flatter (or back-loaded).
//! - skew <= 0: mirror image on the ask side.
//!
//! Prices are geometrically spaced from the best quote out to
//! `best ± spread^1.5`, so levels thin out away from mid.

use smm_core::{MarketSnapshot, QuoteLadder};

use crate::config::StrategyParams;
use crate::correction::{clip, corrected_spread};
use crate::error::{QuoteError, QuoteResult};
use crate::generator::{validate_signal, QuoteGenerator};
use crate::ladder::{assemble_ladder, geometric_weights, geomspace};

#[derive(Debug, Clone)]
pub struct PlainQuoteGenerator {
    params: StrategyParams,
}

/// Per-side levels before rounding.
struct SideLevels {
    prices: Vec<f64>,
    sizes: Vec<f64>,
}

impl PlainQuoteGenerator {
    pub fn new(params: StrategyParams) -> QuoteResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// `aggressiveness * sqrt(magnitude)`.
    fn effective_aggressiveness(&self, magnitude: f64) -> QuoteResult<f64> {
        debug_assert!(magnitude >= 0.0, "sqrt input must be non-negative");
        let value = self.params.aggressiveness * magnitude.sqrt();
        if !value.is_finite() {
            return Err(QuoteError::ComputationFault(format!(
                "effective aggressiveness is not finite for skew magnitude {magnitude}"
            )));
        }
        Ok(value)
    }

    /// Geometric ladder for one side starting at `best` and stepping
    /// `spread^1.5` away from mid (`direction` is -1 for bids, +1 for asks).
    fn side_prices(&self, best: f64, spread: f64, direction: f64) -> QuoteResult<Vec<f64>> {
        let outer = best + direction * spread.powf(1.5);
        geomspace(best, outer, self.params.levels_per_side())
    }

    fn side_sizes(&self, ratio: f64) -> QuoteResult<Vec<f64>> {
        let weights = geometric_weights(self.params.levels_per_side(), ratio, true)?;
        Ok(weights
            .into_iter()
            .map(|w| w * self.params.max_position)
            .collect())
    }

    /// Lean into an expected rise: tighter, heavier bids.
    fn positive_skew_levels(
        &self,
        mid: f64,
        skew: f64,
        spread: f64,
    ) -> QuoteResult<(SideLevels, SideLevels)> {
        let aggressiveness = self.effective_aggressiveness(skew)?;
        let half_spread = spread / 2.0;

        let best_bid = mid - half_spread * (1.0 - aggressiveness);
        if best_bid >= mid {
            return Err(QuoteError::ComputationFault(format!(
                "best bid {best_bid} at or above mid {mid} (effective aggressiveness {aggressiveness})"
            )));
        }
        let best_ask = best_bid + spread;

        let r = 0.5 + clip(skew, 0.0, 0.5);
        let bids = SideLevels {
            prices: self.side_prices(best_bid, spread, -1.0)?,
            sizes: self.side_sizes(r)?,
        };
        let asks = SideLevels {
            prices: self.side_prices(best_ask, spread, 1.0)?,
            sizes: self.side_sizes(0.5 + r.powf(2.0 + aggressiveness))?,
        };
        Ok((bids, asks))
    }

    /// Lean into an expected fall: tighter, heavier asks.
    fn negative_skew_levels(
        &self,
        mid: f64,
        skew: f64,
        spread: f64,
    ) -> QuoteResult<(SideLevels, SideLevels)> {
        let magnitude = skew.abs();
        let aggressiveness = self.effective_aggressiveness(magnitude)?;
        let half_spread = spread / 2.0;

        let best_ask = mid + half_spread * (1.0 - aggressiveness);
        if best_ask <= mid {
            return Err(QuoteError::ComputationFault(format!(
                "best ask {best_ask} at or below mid {mid} (effective aggressiveness {aggressiveness})"
            )));
        }
        let best_bid = best_ask - spread;

        let r = 0.5 + clip(magnitude, 0.0, 0.5);
        let bids = SideLevels {
            prices: self.side_prices(best_bid, spread, -1.0)?,
            sizes: self.side_sizes(0.5 + r.powf(2.0 + aggressiveness))?,
        };
        let asks = SideLevels {
            prices: self.side_prices(best_ask, spread, 1.0)?,
            sizes: self.side_sizes(r)?,
        };
        Ok((bids, asks))
    }
}

impl QuoteGenerator for PlainQuoteGenerator {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn generate_quotes(
        &self,
        snapshot: &MarketSnapshot,
        skew: f64,
        spread: f64,
    ) -> QuoteResult<QuoteLadder> {
        validate_signal(&self.params, snapshot, skew, spread)?;
        let spread = corrected_spread(spread, self.params.minimum_spread);

        let (bids, asks) = if skew > 0.0 {
            self.positive_skew_levels(snapshot.mid, skew, spread)?
        } else {
            self.negative_skew_levels(snapshot.mid, skew, spread)?
        };

        assemble_ladder(
            &bids.prices,
            &bids.sizes,
            &asks.prices,
            &asks.sizes,
            &snapshot.instrument,
        )
    }
}
