//! Prometheus metrics for the smm trading loop.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means duplicate metric
//! names, which must crash at startup. Only static initialization can
//! panic, never a later update.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge_vec, register_histogram_vec, register_int_gauge_vec,
    CounterVec, Encoder, GaugeVec, HistogramVec, IntGaugeVec, TextEncoder,
};

use crate::error::{TelemetryError, TelemetryResult};

/// Loop state labels, in lifecycle order.
pub const LOOP_STATES: [&str; 4] = ["warming_up", "running", "faulted", "stopped"];

/// Trading loop current state (one-hot).
/// Labels: symbol, state
pub static LOOP_STATE: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "smm_loop_state",
        "Trading loop current state (1=active, 0=inactive)",
        &["symbol", "state"]
    )
    .unwrap()
});

/// Ticks by outcome.
pub static TICKS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "smm_ticks_total",
        "Trading loop ticks by outcome",
        &["symbol", "outcome"]
    )
    .unwrap()
});

/// Consecutive computation faults.
pub static CONSECUTIVE_FAULTS: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec!(
        "smm_consecutive_faults",
        "Consecutive ticks ending in a computation fault",
        &["symbol"]
    )
    .unwrap()
});

/// Last raw skew from the feature engine.
pub static SKEW: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!("smm_skew", "Last raw skew signal", &["symbol"]).unwrap()
});

/// Last inventory-corrected skew.
pub static CORRECTED_SKEW: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "smm_corrected_skew",
        "Last inventory-corrected skew",
        &["symbol"]
    )
    .unwrap()
});

/// Last raw spread from the feature engine.
pub static SPREAD: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!("smm_spread", "Last raw spread signal", &["symbol"]).unwrap()
});

/// Quotes in the last submitted ladder.
pub static LADDER_SIZE: Lazy<IntGaugeVec> = Lazy::new(|| {
    register_int_gauge_vec!(
        "smm_ladder_size",
        "Quotes in the last submitted ladder",
        &["symbol"]
    )
    .unwrap()
});

/// Time to generate and hand off one ladder.
pub static TICK_LATENCY_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "smm_tick_latency_ms",
        "Generate plus OMS update latency in milliseconds",
        &["symbol"],
        vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 50.0, 100.0, 500.0]
    )
    .unwrap()
});

/// Per-tick outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Submitted,
    InvalidSignal,
    ComputationFault,
}

impl TickOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::InvalidSignal => "invalid_signal",
            Self::ComputationFault => "computation_fault",
        }
    }
}

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Set the loop state. Only the active state is 1.
    pub fn loop_state_set(symbol: &str, state: &str) {
        for s in LOOP_STATES {
            LOOP_STATE.with_label_values(&[symbol, s]).set(0.0);
        }
        LOOP_STATE.with_label_values(&[symbol, state]).set(1.0);
    }

    pub fn tick(symbol: &str, outcome: TickOutcome) {
        TICKS_TOTAL
            .with_label_values(&[symbol, outcome.as_str()])
            .inc();
    }

    pub fn consecutive_faults(symbol: &str, count: u32) {
        CONSECUTIVE_FAULTS
            .with_label_values(&[symbol])
            .set(i64::from(count));
    }

    /// Record the signal pair seen on a tick.
    pub fn signals(symbol: &str, skew: f64, corrected_skew: f64, spread: f64) {
        SKEW.with_label_values(&[symbol]).set(skew);
        CORRECTED_SKEW.with_label_values(&[symbol]).set(corrected_skew);
        SPREAD.with_label_values(&[symbol]).set(spread);
    }

    pub fn ladder_size(symbol: &str, quotes: usize) {
        LADDER_SIZE
            .with_label_values(&[symbol])
            .set(quotes as i64);
    }

    pub fn tick_latency(symbol: &str, latency_ms: f64) {
        TICK_LATENCY_MS
            .with_label_values(&[symbol])
            .observe(latency_ms);
    }

    /// Render the default registry in the Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&prometheus::gather(), &mut buffer)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
