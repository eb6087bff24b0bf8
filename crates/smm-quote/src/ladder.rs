//! Geometric level helpers and ladder assembly.

use smm_core::{InstrumentSpec, Price, Quote, QuoteLadder, Size};

use crate::error::{QuoteError, QuoteResult};

/// `n` values spaced evenly on a log scale from `start` to `end` inclusive.
///
/// `n = 1` yields `[start]`, `n = 0` yields `[]`. Both endpoints must be
/// positive and finite.
pub fn geomspace(start: f64, end: f64, n: usize) -> QuoteResult<Vec<f64>> {
    if !(start.is_finite() && end.is_finite()) || start <= 0.0 || end <= 0.0 {
        return Err(QuoteError::ComputationFault(format!(
            "geomspace endpoints must be positive and finite: start={start}, end={end}"
        )));
    }
    match n {
        0 => Ok(Vec::new()),
        1 => Ok(vec![start]),
        _ => {
            let ratio = end / start;
            let last = (n - 1) as f64;
            let mut values: Vec<f64> = (0..n)
                .map(|i| start * ratio.powf(i as f64 / last))
                .collect();
            // Pin the endpoint so it is not off by a float ulp.
            values[n - 1] = end;
            Ok(values)
        }
    }
}

/// Weights proportional to successive powers of `ratio`, normalised to sum 1.
///
/// Not reversed: `ratio^(count-1), ..., ratio^0` (back-loaded for ratio < 1).
/// Reversed: `ratio^0, ..., ratio^(count-1)` (front-loaded for ratio < 1).
pub fn geometric_weights(count: usize, ratio: f64, reversed: bool) -> QuoteResult<Vec<f64>> {
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(QuoteError::ComputationFault(format!(
            "geometric ratio must be positive and finite, got {ratio}"
        )));
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut weights: Vec<f64> = (0..count).map(|k| ratio.powi(k as i32)).collect();
    if !reversed {
        weights.reverse();
    }

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(QuoteError::ComputationFault(format!(
            "geometric weights do not normalise: ratio={ratio}, count={count}"
        )));
    }
    for w in &mut weights {
        *w /= total;
    }
    Ok(weights)
}

/// Zip per-side prices and sizes into a bid/ask interleaved ladder.
///
/// Level `i` emits the bid then the ask. Bid prices are floored to the tick
/// grid, ask prices ceiled, sizes ceiled to the lot. Any value that is NaN,
/// infinite or non-positive (before or after rounding) faults the whole
/// ladder; nothing partial is returned.
pub fn assemble_ladder(
    bid_prices: &[f64],
    bid_sizes: &[f64],
    ask_prices: &[f64],
    ask_sizes: &[f64],
    instrument: &InstrumentSpec,
) -> QuoteResult<QuoteLadder> {
    let levels = bid_prices.len();
    if bid_sizes.len() != levels || ask_prices.len() != levels || ask_sizes.len() != levels {
        return Err(QuoteError::ComputationFault(format!(
            "level arrays differ in length: bid_prices={}, bid_sizes={}, ask_prices={}, ask_sizes={}",
            bid_prices.len(),
            bid_sizes.len(),
            ask_prices.len(),
            ask_sizes.len()
        )));
    }

    let mut ladder = QuoteLadder::with_capacity(levels * 2);
    for i in 0..levels {
        let bid = Quote::bid(
            to_price(bid_prices[i], i, |p| p.floor_to_tick(instrument.tick_size))?,
            to_size(bid_sizes[i], i, instrument.lot_size)?,
        );
        let ask = Quote::ask(
            to_price(ask_prices[i], i, |p| p.ceil_to_tick(instrument.tick_size))?,
            to_size(ask_sizes[i], i, instrument.lot_size)?,
        );
        ladder.push_level(bid, ask);
    }
    Ok(ladder)
}

fn to_price(raw: f64, level: usize, round: impl Fn(Price) -> Option<Price>) -> QuoteResult<Price> {
    let price = Price::from_f64(raw)
        .filter(|p| p.is_positive())
        .and_then(round)
        .filter(|p| p.is_positive());
    price.ok_or_else(|| {
        QuoteError::ComputationFault(format!("invalid price {raw} at level {level}"))
    })
}

fn to_size(raw: f64, level: usize, lot_size: Size) -> QuoteResult<Size> {
    let size = Size::from_f64(raw)
        .filter(|s| s.is_positive())
        .and_then(|s| s.ceil_to_lot(lot_size));
    size.ok_or_else(|| QuoteError::ComputationFault(format!("invalid size {raw} at level {level}")))
}
