//! Precision-safe decimal types for quoting.
//!
//! Ladder math runs in `f64` (square roots, fractional powers), but every
//! price and size that leaves the generator is an exact `Decimal` snapped
//! to the exchange grid, so re-rounding is always a no-op.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price with exact decimal precision.
///
/// Wraps `Decimal` to provide type safety and prevent mixing
/// prices with sizes in calculations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Convert a computed `f64` into a price.
    ///
    /// Returns `None` for NaN, infinities, and values outside the `Decimal` range.
    #[inline]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_f64_retain(value).map(Self)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Round down to the tick grid (bid side).
    ///
    /// Returns `None` if the division overflows the `Decimal` range.
    #[inline]
    pub fn floor_to_tick(&self, tick_size: Price) -> Option<Self> {
        if tick_size.is_zero() {
            return Some(*self);
        }
        let ticks = self.0.checked_div(tick_size.0)?.floor();
        ticks.checked_mul(tick_size.0).map(Self)
    }

    /// Round up to the tick grid (ask side). `None` on overflow.
    #[inline]
    pub fn ceil_to_tick(&self, tick_size: Price) -> Option<Self> {
        if tick_size.is_zero() {
            return Some(*self);
        }
        let ticks = self.0.checked_div(tick_size.0)?.ceil();
        ticks.checked_mul(tick_size.0).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

/// Size/quantity with exact decimal precision.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Size(pub Decimal);

impl Size {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Convert a computed `f64` into a size. `None` when not representable.
    #[inline]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_f64_retain(value).map(Self)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Round up to lot size. Quoted sizes are never shaved below the computed amount.
    #[inline]
    pub fn ceil_to_lot(&self, lot_size: Size) -> Option<Self> {
        if lot_size.is_zero() {
            return Some(*self);
        }
        let lots = self.0.checked_div(lot_size.0)?.ceil();
        lots.checked_mul(lot_size.0).map(Self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Size {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Size {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}
