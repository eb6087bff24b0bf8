//! Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use smm_feed::WarmupRequirements;
use smm_quote::{GeneratorKind, StinkyParams, StrategyParams};
use smm_strategy::{LoopConfig, StrategyConfig};

use crate::error::{AppError, AppResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SMM_CONFIG";

/// Used when neither the CLI nor the environment names a file.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Instrument quoted by this process.
    pub symbol: String,

    /// `"plain"` or `"stinky"` (case-insensitive on the CLI, lowercase in TOML).
    #[serde(default)]
    pub quote_generator: GeneratorKind,

    #[serde(default)]
    pub strategy: StrategyParams,

    #[serde(default)]
    pub stinky: StinkyParams,

    #[serde(default)]
    pub trading_loop: LoopConfig,

    #[serde(default)]
    pub warmup: WarmupRequirements,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Telemetry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log the Prometheus text exposition when the loop exits.
    #[serde(default = "default_metrics_on_exit")]
    pub metrics_on_exit: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            metrics_on_exit: default_metrics_on_exit(),
        }
    }
}

fn default_metrics_on_exit() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC-PERP".to_string(),
            quote_generator: GeneratorKind::default(),
            strategy: StrategyParams::default(),
            stinky: StinkyParams::default(),
            trading_loop: LoopConfig::default(),
            warmup: WarmupRequirements::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Config path precedence: CLI argument > `SMM_CONFIG` > default path.
pub fn resolve_config_path(cli: Option<String>) -> String {
    cli.or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

impl AppConfig {
    /// Load from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Settings for the trading loop.
    pub fn strategy_config(&self) -> StrategyConfig {
        StrategyConfig {
            symbol: self.symbol.clone(),
            quote_generator: self.quote_generator,
            strategy: self.strategy.clone(),
            stinky: self.stinky.clone(),
            trading_loop: self.trading_loop.clone(),
            warmup: self.warmup.clone(),
        }
    }

    /// Reject configurations no loop could start with.
    pub fn validate(&self) -> AppResult<()> {
        self.strategy_config().validate()?;
        Ok(())
    }
}
