//! Quote generator parameters.
//!
//! Loaded once per session and read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};

/// Parameters shared by every quote generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    /// How strongly skew pulls the best quote toward mid.
    /// 0.0 = best quote sits half a spread from mid regardless of skew.
    #[serde(default = "default_aggressiveness")]
    pub aggressiveness: f64,

    /// Spread floor in basis points. The ceiling is 5x this floor.
    #[serde(default = "default_minimum_spread")]
    pub minimum_spread: f64,

    /// Total ladder depth across both sides. Must be even and >= 2.
    #[serde(default = "default_total_orders")]
    pub total_orders: u32,

    /// Size scale; each side's level sizes sum to roughly this amount.
    #[serde(default = "default_max_position")]
    pub max_position: f64,

    /// Largest |skew| accepted before a tick is skipped as an invalid signal.
    #[serde(default = "default_max_abs_skew")]
    pub max_abs_skew: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            aggressiveness: default_aggressiveness(),
            minimum_spread: default_minimum_spread(),
            total_orders: default_total_orders(),
            max_position: default_max_position(),
            max_abs_skew: default_max_abs_skew(),
        }
    }
}

fn default_aggressiveness() -> f64 {
    0.5
}
fn default_minimum_spread() -> f64 {
    10.0 // 10 bps
}
fn default_total_orders() -> u32 {
    10
}
fn default_max_position() -> f64 {
    1.0
}
fn default_max_abs_skew() -> f64 {
    // |skew| <= 1 plus an inventory penalty of at most 1.
    2.0
}

impl StrategyParams {
    /// Levels per side.
    pub fn levels_per_side(&self) -> usize {
        (self.total_orders / 2) as usize
    }

    /// Reject parameters no generator can work with.
    pub fn validate(&self) -> QuoteResult<()> {
        if self.total_orders < 2 || self.total_orders % 2 != 0 {
            return Err(QuoteError::Configuration(format!(
                "total_orders must be even and >= 2, got {}",
                self.total_orders
            )));
        }
        if !self.aggressiveness.is_finite() || self.aggressiveness < 0.0 {
            return Err(QuoteError::Configuration(format!(
                "aggressiveness must be finite and >= 0, got {}",
                self.aggressiveness
            )));
        }
        if !self.minimum_spread.is_finite() || self.minimum_spread <= 0.0 {
            return Err(QuoteError::Configuration(format!(
                "minimum_spread must be finite and > 0 bps, got {}",
                self.minimum_spread
            )));
        }
        if !self.max_position.is_finite() || self.max_position <= 0.0 {
            return Err(QuoteError::Configuration(format!(
                "max_position must be finite and > 0, got {}",
                self.max_position
            )));
        }
        if !self.max_abs_skew.is_finite() || self.max_abs_skew <= 0.0 {
            return Err(QuoteError::Configuration(format!(
                "max_abs_skew must be finite and > 0, got {}",
                self.max_abs_skew
            )));
        }
        Ok(())
    }
}

/// Parameters for the deep-resting "stinky" ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StinkyParams {
    /// Innermost level distance from mid = corrected spread x this.
    #[serde(default = "default_depth_multiplier")]
    pub depth_multiplier: f64,

    /// Outermost level distance = innermost distance x this.
    #[serde(default = "default_range_multiplier")]
    pub range_multiplier: f64,

    /// Exponent for level spacing (1.0 = linear, 2.0 = quadratic).
    #[serde(default = "default_level_exponent")]
    pub level_exponent: f64,

    /// How far prediction skew tightens the favoured side (0.3 = up to 30%).
    #[serde(default = "default_skew_factor")]
    pub skew_factor: f64,

    /// Inventory skew factor (0.0 = no skew, 1.0 = full skew).
    /// When long, bid distance grows and ask distance shrinks.
    #[serde(default = "default_inventory_skew_factor")]
    pub inventory_skew_factor: f64,

    /// Size multiplier for the innermost level.
    #[serde(default = "default_size_min_multiplier")]
    pub size_min_multiplier: f64,

    /// Size multiplier for the outermost level.
    #[serde(default = "default_size_max_multiplier")]
    pub size_max_multiplier: f64,
}

impl Default for StinkyParams {
    fn default() -> Self {
        Self {
            depth_multiplier: default_depth_multiplier(),
            range_multiplier: default_range_multiplier(),
            level_exponent: default_level_exponent(),
            skew_factor: default_skew_factor(),
            inventory_skew_factor: default_inventory_skew_factor(),
            size_min_multiplier: default_size_min_multiplier(),
            size_max_multiplier: default_size_max_multiplier(),
        }
    }
}

fn default_depth_multiplier() -> f64 {
    3.0
}
fn default_range_multiplier() -> f64 {
    3.0
}
fn default_level_exponent() -> f64 {
    2.0 // quadratic distribution
}
fn default_skew_factor() -> f64 {
    0.3
}
fn default_inventory_skew_factor() -> f64 {
    0.3
}
fn default_size_min_multiplier() -> f64 {
    0.5 // 0.5x for innermost level
}
fn default_size_max_multiplier() -> f64 {
    1.5 // 1.5x for outermost level
}

impl StinkyParams {
    pub fn validate(&self) -> QuoteResult<()> {
        let positive = [
            ("depth_multiplier", self.depth_multiplier),
            ("level_exponent", self.level_exponent),
            ("size_min_multiplier", self.size_min_multiplier),
            ("size_max_multiplier", self.size_max_multiplier),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(QuoteError::Configuration(format!(
                    "stinky.{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !self.range_multiplier.is_finite() || self.range_multiplier < 1.0 {
            return Err(QuoteError::Configuration(format!(
                "stinky.range_multiplier must be >= 1, got {}",
                self.range_multiplier
            )));
        }
        for (name, value) in [
            ("skew_factor", self.skew_factor),
            ("inventory_skew_factor", self.inventory_skew_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(QuoteError::Configuration(format!(
                    "stinky.{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = StrategyParams::default();
        assert_eq!(params.aggressiveness, 0.5);
        assert_eq!(params.minimum_spread, 10.0);
        assert_eq!(params.total_orders, 10);
        assert_eq!(params.levels_per_side(), 5);
        assert!(params.validate().is_ok());

        let stinky = StinkyParams::default();
        assert_eq!(stinky.level_exponent, 2.0);
        assert_eq!(stinky.size_min_multiplier, 0.5);
        assert_eq!(stinky.size_max_multiplier, 1.5);
        assert!(stinky.validate().is_ok());
    }

    #[test]
    fn test_odd_total_orders_rejected() {
        let params = StrategyParams {
            total_orders: 5,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(QuoteError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_total_orders_rejected() {
        let params = StrategyParams {
            total_orders: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_two_total_orders_accepted() {
        let params = StrategyParams {
            total_orders: 2,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.levels_per_side(), 1);
    }

    #[test]
    fn test_non_finite_params_rejected() {
        for params in [
            StrategyParams {
                aggressiveness: f64::NAN,
                ..Default::default()
            },
            StrategyParams {
                minimum_spread: 0.0,
                ..Default::default()
            },
            StrategyParams {
                max_position: -1.0,
                ..Default::default()
            },
        ] {
            assert!(params.validate().is_err(), "{params:?}");
        }
    }

    #[test]
    fn test_stinky_range_below_one_rejected() {
        let params = StinkyParams {
            range_multiplier: 0.5,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_params_serde_defaults() {
        let toml_str = r#"
aggressiveness = 0.8
total_orders = 4
"#;
        let params: StrategyParams = toml::from_str(toml_str).unwrap();
        assert_eq!(params.aggressiveness, 0.8);
        assert_eq!(params.total_orders, 4);
        assert_eq!(params.minimum_spread, 10.0);
        assert_eq!(params.max_abs_skew, 2.0);
    }
}
