//! smm market maker application.
//!
//! Wires configuration, the market state store, telemetry and one trading
//! loop per process. Feature engine and OMS are supplied by the embedder.

pub mod app;
pub mod config;
pub mod error;

pub use app::{Application, QuoteRequest};
pub use config::{resolve_config_path, AppConfig, TelemetryConfig};
pub use error::{AppError, AppResult};
