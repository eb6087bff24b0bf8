//! Prometheus metrics and structured logging for smm.
//!
//! - Structured logging with tracing (JSON in production)
//! - Prometheus metrics for the trading loop: state, tick outcomes,
//!   signal values and ladder size

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::{Metrics, TickOutcome};
