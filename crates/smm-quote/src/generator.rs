//! Generator trait and registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smm_core::{MarketSnapshot, QuoteLadder};

use crate::config::{StinkyParams, StrategyParams};
use crate::error::{QuoteError, QuoteResult};
use crate::plain::PlainQuoteGenerator;
use crate::stinky::StinkyQuoteGenerator;

/// Turns a corrected skew and raw spread into a quote ladder.
///
/// Implementations are pure: the same snapshot and signals always yield the
/// same ladder. The skew passed in is already inventory-corrected.
pub trait QuoteGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate_quotes(
        &self,
        snapshot: &MarketSnapshot,
        skew: f64,
        spread: f64,
    ) -> QuoteResult<QuoteLadder>;
}

/// Generator names accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    #[default]
    Plain,
    Stinky,
}

impl GeneratorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Stinky => "stinky",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "stinky" => Ok(Self::Stinky),
            other => Err(QuoteError::Configuration(format!(
                "unknown quote generator: {other:?}"
            ))),
        }
    }
}

/// Closed set of generator implementations.
#[derive(Debug, Clone)]
pub enum AnyQuoteGenerator {
    Plain(PlainQuoteGenerator),
    Stinky(StinkyQuoteGenerator),
}

impl AnyQuoteGenerator {
    /// Build the generator for `kind`, validating its parameters.
    pub fn new(
        kind: GeneratorKind,
        params: StrategyParams,
        stinky: StinkyParams,
    ) -> QuoteResult<Self> {
        match kind {
            GeneratorKind::Plain => Ok(Self::Plain(PlainQuoteGenerator::new(params)?)),
            GeneratorKind::Stinky => Ok(Self::Stinky(StinkyQuoteGenerator::new(params, stinky)?)),
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Plain(_) => GeneratorKind::Plain,
            Self::Stinky(_) => GeneratorKind::Stinky,
        }
    }
}

impl QuoteGenerator for AnyQuoteGenerator {
    fn name(&self) -> &'static str {
        match self {
            Self::Plain(g) => g.name(),
            Self::Stinky(g) => g.name(),
        }
    }

    fn generate_quotes(
        &self,
        snapshot: &MarketSnapshot,
        skew: f64,
        spread: f64,
    ) -> QuoteResult<QuoteLadder> {
        match self {
            Self::Plain(g) => g.generate_quotes(snapshot, skew, spread),
            Self::Stinky(g) => g.generate_quotes(snapshot, skew, spread),
        }
    }
}

/// Reject signals and snapshots no generator can quote from.
pub(crate) fn validate_signal(
    params: &StrategyParams,
    snapshot: &MarketSnapshot,
    skew: f64,
    spread: f64,
) -> QuoteResult<()> {
    if !spread.is_finite() || spread <= 0.0 {
        return Err(QuoteError::InvalidSignal(format!(
            "spread must be positive and finite, got {spread}"
        )));
    }
    if !skew.is_finite() {
        return Err(QuoteError::InvalidSignal(format!(
            "skew must be finite, got {skew}"
        )));
    }
    if skew.abs() > params.max_abs_skew {
        return Err(QuoteError::InvalidSignal(format!(
            "|skew| {} exceeds max_abs_skew {}",
            skew.abs(),
            params.max_abs_skew
        )));
    }
    snapshot
        .validate()
        .map_err(|e| QuoteError::InvalidSignal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str_case_insensitive() {
        assert_eq!("plain".parse::<GeneratorKind>().unwrap(), GeneratorKind::Plain);
        assert_eq!("Stinky".parse::<GeneratorKind>().unwrap(), GeneratorKind::Stinky);
        assert_eq!(" PLAIN ".parse::<GeneratorKind>().unwrap(), GeneratorKind::Plain);
    }

    #[test]
    fn test_unknown_kind_is_configuration_error() {
        let err = "fancy".parse::<GeneratorKind>().unwrap_err();
        assert!(matches!(err, QuoteError::Configuration(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_kind_serde() {
        #[derive(Deserialize)]
        struct Wrapper {
            quote_generator: GeneratorKind,
        }
        let w: Wrapper = toml::from_str(r#"quote_generator = "stinky""#).unwrap();
        assert_eq!(w.quote_generator, GeneratorKind::Stinky);
        assert!(toml::from_str::<Wrapper>(r#"quote_generator = "fancy""#).is_err());
    }

    #[test]
    fn test_any_generator_dispatch() {
        let plain = AnyQuoteGenerator::new(
            GeneratorKind::Plain,
            StrategyParams::default(),
            StinkyParams::default(),
        )
        .unwrap();
        assert_eq!(plain.kind(), GeneratorKind::Plain);
        assert_eq!(plain.name(), "plain");

        let stinky = AnyQuoteGenerator::new(
            GeneratorKind::Stinky,
            StrategyParams::default(),
            StinkyParams::default(),
        )
        .unwrap();
        assert_eq!(stinky.name(), "stinky");
    }

    #[test]
    fn test_invalid_params_rejected_at_construction() {
        let params = StrategyParams {
            total_orders: 3,
            ..Default::default()
        };
        let result = AnyQuoteGenerator::new(GeneratorKind::Plain, params, StinkyParams::default());
        assert!(matches!(result, Err(QuoteError::Configuration(_))));
    }

    #[test]
    fn test_validate_signal() {
        let params = StrategyParams::default();
        let snap = MarketSnapshot {
            mid: 100.0,
            ..MarketSnapshot::empty()
        };
        assert!(validate_signal(&params, &snap, 0.2, 0.5).is_ok());

        for (skew, spread) in [(0.2, 0.0), (0.2, -1.0), (0.2, f64::NAN), (f64::NAN, 0.5), (2.5, 0.5)] {
            assert!(matches!(
                validate_signal(&params, &snap, skew, spread),
                Err(QuoteError::InvalidSignal(_))
            ));
        }

        let bad_mid = MarketSnapshot::empty();
        assert!(matches!(
            validate_signal(&params, &bad_mid, 0.2, 0.5),
            Err(QuoteError::InvalidSignal(_))
        ));
    }
}
