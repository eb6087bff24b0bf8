//! Trading loop configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smm_feed::WarmupRequirements;
use smm_quote::{GeneratorKind, StinkyParams, StrategyParams};

use crate::error::{StrategyError, StrategyResult};

/// Loop timing and fault tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Interval between quoting ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Interval between warm-up readiness polls.
    #[serde(default = "default_warmup_poll_interval_ms")]
    pub warmup_poll_interval_ms: u64,

    /// Give up warming up after this long. 0 = wait forever.
    #[serde(default)]
    pub warmup_timeout_ms: u64,

    /// Consecutive computation faults before the loop faults.
    #[serde(default = "default_max_consecutive_faults")]
    pub max_consecutive_faults: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            warmup_poll_interval_ms: default_warmup_poll_interval_ms(),
            warmup_timeout_ms: 0,
            max_consecutive_faults: default_max_consecutive_faults(),
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_warmup_poll_interval_ms() -> u64 {
    1000
}
fn default_max_consecutive_faults() -> u32 {
    3
}

impl LoopConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn warmup_poll_interval(&self) -> Duration {
        Duration::from_millis(self.warmup_poll_interval_ms)
    }

    /// `None` when warm-up is unbounded.
    pub fn warmup_timeout(&self) -> Option<Duration> {
        (self.warmup_timeout_ms > 0).then(|| Duration::from_millis(self.warmup_timeout_ms))
    }

    pub fn validate(&self) -> StrategyResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(StrategyError::Config(
                "trading_loop.tick_interval_ms must be > 0".to_string(),
            ));
        }
        if self.warmup_poll_interval_ms == 0 {
            return Err(StrategyError::Config(
                "trading_loop.warmup_poll_interval_ms must be > 0".to_string(),
            ));
        }
        if self.max_consecutive_faults == 0 {
            return Err(StrategyError::Config(
                "trading_loop.max_consecutive_faults must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything one trading loop needs besides its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub symbol: String,
    pub quote_generator: GeneratorKind,
    pub strategy: StrategyParams,
    pub stinky: StinkyParams,
    pub trading_loop: LoopConfig,
    pub warmup: WarmupRequirements,
}

impl StrategyConfig {
    /// Defaults for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            quote_generator: GeneratorKind::default(),
            strategy: StrategyParams::default(),
            stinky: StinkyParams::default(),
            trading_loop: LoopConfig::default(),
            warmup: WarmupRequirements::default(),
        }
    }

    /// Validate loop settings and the selected generator's parameters.
    pub fn validate(&self) -> StrategyResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(StrategyError::Config("symbol must not be empty".to_string()));
        }
        self.trading_loop.validate()?;
        self.strategy.validate()?;
        if self.quote_generator == GeneratorKind::Stinky {
            self.stinky.validate()?;
        }
        Ok(())
    }
}
