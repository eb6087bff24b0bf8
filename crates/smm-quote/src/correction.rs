//! Skew and spread correction.
//!
//! Both are pure functions of their inputs. The strategy loop applies
//! [`corrected_skew`] once per tick; generators apply [`corrected_spread`]
//! themselves since the floor depends on their parameters.

/// Basis points to a plain fraction (10 bps -> 0.001).
#[inline]
pub fn bps_to_decimal(bps: f64) -> f64 {
    bps / 10_000.0
}

/// `min(max(x, lo), hi)`. Unlike `f64::clamp` this never panics on `lo > hi`.
#[inline]
pub(crate) fn clip(x: f64, lo: f64, hi: f64) -> f64 {
    x.max(lo).min(hi)
}

/// Shift the raw skew against current inventory.
///
/// The penalty is `inventory_delta²`: subtracted when long (or flat),
/// added when short.
pub fn corrected_skew(skew: f64, inventory_delta: f64) -> f64 {
    let penalty = inventory_delta * inventory_delta;
    if inventory_delta < 0.0 {
        skew + penalty
    } else {
        skew - penalty
    }
}

/// Floor the spread at `minimum_spread_bps` and cap it at five times that.
///
/// Spreads below the floor snap to the floor; spreads in the band pass
/// through unchanged; wider spreads are pulled down to the cap. The
/// floor is compared directly against the price-unit spread.
pub fn corrected_spread(spread: f64, minimum_spread_bps: f64) -> f64 {
    let min_spread = bps_to_decimal(minimum_spread_bps);
    if spread < min_spread {
        min_spread
    } else {
        clip(spread, spread, min_spread * 5.0)
    }
}
