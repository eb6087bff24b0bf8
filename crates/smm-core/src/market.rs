//! Instrument specification.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{Price, Size};

/// Exchange rounding granularities for the quoted instrument.
///
/// Loaded once per session by the feed and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Minimum price increment.
    pub tick_size: Price,
    /// Minimum size increment.
    pub lot_size: Size,
}

impl InstrumentSpec {
    pub fn new(tick_size: Price, lot_size: Size) -> Self {
        Self {
            tick_size,
            lot_size,
        }
    }

    /// Parse tick and lot sizes from their decimal string form.
    pub fn parse(tick_size: &str, lot_size: &str) -> Result<Self> {
        Ok(Self {
            tick_size: tick_size.parse()?,
            lot_size: lot_size.parse()?,
        })
    }

    /// Whether the feed has delivered usable tick and lot sizes.
    pub fn is_loaded(&self) -> bool {
        self.tick_size.is_positive() && self.lot_size.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_is_not_loaded() {
        assert!(!InstrumentSpec::default().is_loaded());
    }

    #[test]
    fn test_partial_spec_is_not_loaded() {
        let spec = InstrumentSpec::new(Price::new(dec!(0.01)), Size::ZERO);
        assert!(!spec.is_loaded());
    }

    #[test]
    fn test_parse() {
        let spec = InstrumentSpec::parse("0.01", "0.001").unwrap();
        assert_eq!(spec.tick_size.inner(), dec!(0.01));
        assert_eq!(spec.lot_size.inner(), dec!(0.001));
        assert!(InstrumentSpec::parse("abc", "0.001").is_err());
    }

    #[test]
    fn test_loaded_spec() {
        let spec = InstrumentSpec::new(Price::new(dec!(0.01)), Size::new(dec!(0.001)));
        assert!(spec.is_loaded());
    }
}
