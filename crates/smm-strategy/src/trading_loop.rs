//! Per-symbol trading loop.
//!
//! One cooperative task per symbol. Suspension points are the warm-up poll
//! sleep and the tick interval, both raced against the shutdown token. A
//! tick that has started (generate + OMS hand-off) always completes before
//! the loop observes cancellation.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use smm_feed::MarketDataStore;
use smm_quote::{corrected_skew, AnyQuoteGenerator, QuoteError, QuoteGenerator};
use smm_telemetry::{Metrics, TickOutcome};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::StrategyConfig;
use crate::error::{StrategyError, StrategyResult};
use crate::ports::{DynFeatureEngine, DynOms};

/// Lifecycle state of a trading loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for the feed to fill its buffers.
    WarmingUp,
    /// Quoting once per tick.
    Running,
    /// Terminal: no further ticks.
    Faulted,
    /// Terminal: cancelled cleanly.
    Stopped,
}

impl LoopState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WarmingUp => "warming_up",
            Self::Running => "running",
            Self::Faulted => "faulted",
            Self::Stopped => "stopped",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Faulted | Self::Stopped)
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tick counters since the loop started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub submitted: u64,
    pub invalid_signals: u64,
    pub computation_faults: u64,
    pub consecutive_faults: u32,
}

pub struct TradingLoop {
    config: StrategyConfig,
    market: Arc<dyn MarketDataStore>,
    features: DynFeatureEngine,
    oms: DynOms,
    shutdown: CancellationToken,
    state: RwLock<LoopState>,
    stats: Mutex<LoopStats>,
}

impl TradingLoop {
    pub fn new(
        config: StrategyConfig,
        market: Arc<dyn MarketDataStore>,
        features: DynFeatureEngine,
        oms: DynOms,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config,
            market,
            features,
            oms,
            shutdown,
            state: RwLock::new(LoopState::WarmingUp),
            stats: Mutex::new(LoopStats::default()),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn state(&self) -> LoopState {
        *self.state.read()
    }

    pub fn stats(&self) -> LoopStats {
        *self.stats.lock()
    }

    fn set_state(&self, state: LoopState) {
        *self.state.write() = state;
        Metrics::loop_state_set(&self.config.symbol, state.as_str());
    }

    /// Run until cancelled (`Ok`) or faulted (`Err`).
    pub async fn run(&self) -> StrategyResult<()> {
        info!(
            symbol = %self.config.symbol,
            generator = %self.config.quote_generator,
            tick_interval_ms = self.config.trading_loop.tick_interval_ms,
            "Trading loop starting"
        );

        let result = self.run_phases().await;
        match &result {
            Ok(()) => {
                self.set_state(LoopState::Stopped);
                info!(symbol = %self.config.symbol, stats = ?self.stats(), "Trading loop stopped");
            }
            Err(e) => {
                self.set_state(LoopState::Faulted);
                error!(symbol = %self.config.symbol, error = %e, "Trading loop faulted");
            }
        }
        result
    }

    async fn run_phases(&self) -> StrategyResult<()> {
        if !self.warm_up().await? {
            return Ok(());
        }

        let generator = AnyQuoteGenerator::new(
            self.config.quote_generator,
            self.config.strategy.clone(),
            self.config.stinky.clone(),
        )?;
        info!(
            symbol = %self.config.symbol,
            generator = generator.name(),
            total_orders = self.config.strategy.total_orders,
            "Quote generator loaded"
        );

        self.set_state(LoopState::Running);
        self.quote(&generator).await
    }

    /// Poll until warm. Returns `false` if cancelled first.
    async fn warm_up(&self) -> StrategyResult<bool> {
        self.set_state(LoopState::WarmingUp);

        let started = Instant::now();
        let poll_interval = self.config.trading_loop.warmup_poll_interval();
        let timeout = self.config.trading_loop.warmup_timeout();
        let mut polls: u64 = 0;

        loop {
            let snapshot = self.market.snapshot();
            let progress = self.config.warmup.check(&snapshot);
            if progress.is_ready() {
                info!(
                    symbol = %self.config.symbol,
                    waited_ms = started.elapsed().as_millis() as u64,
                    trades = snapshot.trade_count,
                    ohlcv = snapshot.ohlcv_count,
                    "Warm-up complete"
                );
                return Ok(true);
            }

            let waited = started.elapsed();
            if let Some(timeout) = timeout {
                if waited >= timeout {
                    return Err(StrategyError::WarmupTimeout {
                        waited_ms: waited.as_millis() as u64,
                        pending: progress.pending().join(", "),
                    });
                }
            }

            if polls % 10 == 0 {
                debug!(
                    symbol = %self.config.symbol,
                    pending = ?progress.pending(),
                    trades = snapshot.trade_count,
                    ohlcv = snapshot.ohlcv_count,
                    tickers = snapshot.ticker_count,
                    "Waiting for warm-up"
                );
            }
            polls += 1;

            tokio::select! {
                () = tokio::time::sleep(poll_interval) => {}
                () = self.shutdown.cancelled() => {
                    info!(symbol = %self.config.symbol, "Shutdown requested during warm-up");
                    return Ok(false);
                }
            }
        }
    }

    /// Tick until cancelled or the fault limit is hit.
    async fn quote(&self, generator: &AnyQuoteGenerator) -> StrategyResult<()> {
        let symbol = self.config.symbol.as_str();
        let max_faults = self.config.trading_loop.max_consecutive_faults;

        let mut ticker = tokio::time::interval(self.config.trading_loop.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = self.shutdown.cancelled() => {
                    info!(symbol = %symbol, "Shutdown requested, leaving quoting loop");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            let result = self.tick(generator).await;

            let mut stats = self.stats.lock();
            stats.ticks += 1;
            match result {
                Ok(()) => {
                    stats.submitted += 1;
                    stats.consecutive_faults = 0;
                    Metrics::tick(symbol, TickOutcome::Submitted);
                }
                Err(e @ QuoteError::InvalidSignal(_)) => {
                    // Not a fault, but it does break a run of faults.
                    stats.invalid_signals += 1;
                    stats.consecutive_faults = 0;
                    Metrics::tick(symbol, TickOutcome::InvalidSignal);
                    warn!(symbol = %symbol, error = %e, "Skipping tick");
                }
                Err(e @ QuoteError::ComputationFault(_)) => {
                    stats.computation_faults += 1;
                    stats.consecutive_faults += 1;
                    Metrics::tick(symbol, TickOutcome::ComputationFault);
                    warn!(
                        symbol = %symbol,
                        error = %e,
                        consecutive = stats.consecutive_faults,
                        max = max_faults,
                        "Computation fault, skipping tick"
                    );
                    if stats.consecutive_faults >= max_faults {
                        return Err(StrategyError::FaultLimit {
                            count: stats.consecutive_faults,
                            last: e,
                        });
                    }
                }
                Err(e @ QuoteError::Configuration(_)) => return Err(e.into()),
            }
            Metrics::consecutive_faults(symbol, stats.consecutive_faults);
        }
    }

    /// One snapshot, one signal pair, one ladder.
    async fn tick(&self, generator: &AnyQuoteGenerator) -> Result<(), QuoteError> {
        let symbol = self.config.symbol.as_str();
        let started = Instant::now();

        let snapshot = self.market.snapshot();
        let skew = self.features.generate_skew();
        let spread = self.features.generate_vol();
        let skew_corrected = corrected_skew(skew, snapshot.inventory_delta);
        Metrics::signals(symbol, skew, skew_corrected, spread);

        let ladder = generator.generate_quotes(&snapshot, skew_corrected, spread)?;
        debug!(
            symbol = %symbol,
            version = snapshot.version,
            mid = snapshot.mid,
            skew = skew_corrected,
            spread,
            quotes = ladder.len(),
            best_bid = ?ladder.best_bid(),
            best_ask = ?ladder.best_ask(),
            "Ladder generated"
        );
        Metrics::ladder_size(symbol, ladder.len());

        self.oms.update(ladder).await;
        Metrics::tick_latency(symbol, started.elapsed().as_secs_f64() * 1000.0);
        Ok(())
    }
}
