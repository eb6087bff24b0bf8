//! Main application orchestration.
//!
//! Owns the market state store the feed publishes into and the shutdown
//! token shared with the trading loop. Ctrl-C cancels the token; the loop
//! finishes its in-flight tick and returns.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smm_core::{InstrumentSpec, MarketSnapshot, QuoteLadder};
use smm_feed::MarketState;
use smm_quote::{corrected_skew, AnyQuoteGenerator, QuoteGenerator};
use smm_strategy::{DynFeatureEngine, DynOms, TradingLoop};
use smm_telemetry::Metrics;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Inputs for a one-shot ladder computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub mid: f64,
    pub inventory_delta: f64,
    /// Raw skew, before inventory correction.
    pub skew: f64,
    pub spread: f64,
    pub tick_size: String,
    pub lot_size: String,
}

/// Main application.
pub struct Application {
    config: AppConfig,
    market_state: Arc<MarketState>,
    shutdown: CancellationToken,
}

impl Application {
    /// Validate `config` and set up shared state.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            market_state: Arc::new(MarketState::new()),
            shutdown: CancellationToken::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Store the market data feed publishes into.
    pub fn market_state(&self) -> Arc<MarketState> {
        self.market_state.clone()
    }

    /// Cancelling this token stops the trading loop.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Build the trading loop over the shared store.
    pub fn build_loop(&self, features: DynFeatureEngine, oms: DynOms) -> TradingLoop {
        TradingLoop::new(
            self.config.strategy_config(),
            self.market_state.clone(),
            features,
            oms,
            self.shutdown.clone(),
        )
    }

    /// Run the trading loop until Ctrl-C, cancellation or a fault.
    ///
    /// The feature engine and OMS live outside this workspace, so the binary
    /// does not call this; embedders supply both and drive it themselves.
    pub async fn run(&self, features: DynFeatureEngine, oms: DynOms) -> AppResult<()> {
        let trading_loop = self.build_loop(features, oms);

        let token = self.shutdown.clone();
        let signal_task = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, shutting down");
                    token.cancel();
                }
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
            }
        });

        let result = trading_loop.run().await;
        signal_task.abort();

        if self.config.telemetry.metrics_on_exit {
            match Metrics::render() {
                Ok(text) => info!(metrics = %text, "Final metrics"),
                Err(e) => warn!(error = %e, "Failed to render metrics"),
            }
        }

        result?;
        Ok(())
    }

    /// Compute one ladder without running the loop.
    ///
    /// Uses the same skew correction and generator as a live tick, but quotes
    /// from a snapshot built from the request. The shared store is not touched.
    pub fn quote_once(&self, request: &QuoteRequest) -> AppResult<QuoteLadder> {
        let snapshot = MarketSnapshot {
            mid: request.mid,
            inventory_delta: request.inventory_delta,
            instrument: InstrumentSpec::parse(&request.tick_size, &request.lot_size)?,
            ..MarketSnapshot::empty()
        };

        let generator = AnyQuoteGenerator::new(
            self.config.quote_generator,
            self.config.strategy.clone(),
            self.config.stinky.clone(),
        )?;
        let skew = corrected_skew(request.skew, snapshot.inventory_delta);
        Ok(generator.generate_quotes(&snapshot, skew, request.spread)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use smm_feed::MarketDataStore;

    fn request() -> QuoteRequest {
        QuoteRequest {
            mid: 100.0,
            inventory_delta: 0.0,
            skew: 0.4,
            spread: 1.0,
            tick_size: "0.01".to_string(),
            lot_size: "0.001".to_string(),
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.strategy.total_orders = 1;
        assert!(Application::new(config).is_err());
    }

    #[test]
    fn test_quote_once() {
        let mut config = AppConfig::default();
        config.strategy.total_orders = 4;
        config.strategy.minimum_spread = 500.0;
        config.strategy.max_position = 10.0;
        let app = Application::new(config).unwrap();

        let ladder = app.quote_once(&request()).unwrap();
        assert_eq!(ladder.len(), 4);
        assert_eq!(ladder.best_bid().unwrap().to_string(), "99.91");
    }

    #[test]
    fn test_quote_once_leaves_live_store_untouched() {
        let app = Application::new(AppConfig::default()).unwrap();
        let market = app.market_state();
        market.set_instrument(InstrumentSpec::parse("0.5", "0.01").unwrap());
        market.update_mid_and_inventory(2000.0, -0.4).unwrap();
        let before = market.snapshot();

        app.quote_once(&request()).unwrap();

        let after = market.snapshot();
        assert_eq!(after.version, before.version);
        assert_eq!(after.mid, 2000.0);
        assert_eq!(after.inventory_delta, -0.4);
        assert_eq!(after.instrument, before.instrument);
    }

    #[test]
    fn test_quote_once_bad_tick_size() {
        let app = Application::new(AppConfig::default()).unwrap();
        let req = QuoteRequest {
            tick_size: "abc".to_string(),
            ..request()
        };
        assert!(matches!(app.quote_once(&req), Err(AppError::Core(_))));
    }

    #[test]
    fn test_quote_once_invalid_signal() {
        let app = Application::new(AppConfig::default()).unwrap();
        let req = QuoteRequest {
            spread: -1.0,
            ..request()
        };
        assert!(matches!(app.quote_once(&req), Err(AppError::Quote(_))));
    }
}
