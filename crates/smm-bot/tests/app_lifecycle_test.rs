//! Application wiring tests.
//!
//! Drives a full application over scripted collaborators: the feed
//! publishes into the shared store, the loop warms up, quotes, and stops
//! when the shutdown token is cancelled.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use smm_bot::{AppConfig, AppError, Application};
use smm_core::{InstrumentSpec, Price, Side, Size};
use smm_quote::GeneratorKind;
use smm_strategy::{RecordingOms, ScriptedFeatureEngine, StrategyError};

fn shipped_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml")
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::from_file(shipped_config_path()).unwrap();
    config.symbol = "APP-TEST".to_string();
    config.strategy.total_orders = 4;
    config.strategy.minimum_spread = 500.0;
    config.strategy.max_position = 10.0;
    config.telemetry.metrics_on_exit = false;
    config
}

#[test]
fn test_shipped_config_is_valid() {
    let config = AppConfig::from_file(shipped_config_path()).unwrap();
    assert_eq!(config.quote_generator, GeneratorKind::Plain);
    assert_eq!(config.strategy.total_orders, 10);
    config.validate().unwrap();
}

#[test]
fn test_missing_config_file() {
    let result = AppConfig::from_file("does/not/exist.toml");
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[tokio::test(start_paused = true)]
async fn test_run_quotes_after_feed_warms_up_and_stops_on_cancel() {
    let app = Arc::new(Application::new(test_config()).unwrap());
    let oms = Arc::new(RecordingOms::new());
    let features = Arc::new(ScriptedFeatureEngine::constant(0.4, 1.0));

    let runner = {
        let app = app.clone();
        let oms = oms.clone();
        tokio::spawn(async move { app.run(features, oms).await })
    };

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(oms.update_count(), 0);

    let market = app.market_state();
    market.set_instrument(InstrumentSpec::new(
        Price::new(dec!(0.01)),
        Size::new(dec!(0.001)),
    ));
    market.update_counts(150, 120, 3);
    market.update_mid_and_inventory(100.0, 0.0).unwrap();

    // Warm-up poll at 2000, ticks at 2000 and 3000.
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(oms.update_count(), 2);

    app.shutdown_token().cancel();
    runner.await.unwrap().unwrap();

    let ladder = oms.last().unwrap();
    assert_eq!(ladder.len(), 4);
    assert_eq!(ladder.as_slice()[0].side, Side::Bid);
    assert_eq!(ladder.best_bid(), Some(Price::new(dec!(99.91))));
}

#[tokio::test(start_paused = true)]
async fn test_run_surfaces_warmup_timeout() {
    let mut config = test_config();
    config.trading_loop.warmup_timeout_ms = 3000;
    let app = Application::new(config).unwrap();

    let result = app
        .run(
            Arc::new(ScriptedFeatureEngine::constant(0.4, 1.0)),
            Arc::new(RecordingOms::new()),
        )
        .await;
    assert!(matches!(
        result,
        Err(AppError::Strategy(StrategyError::WarmupTimeout { .. }))
    ));
}
