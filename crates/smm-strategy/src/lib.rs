//! Trading loop for smm.
//!
//! Drives one symbol through warm-up and then, once per tick, reads a
//! market snapshot, asks the feature engine for (skew, spread), corrects
//! the skew for inventory, generates a ladder and hands it to the OMS.
//!
//! ```text
//! WarmingUp ──ready──▶ Running ──fault limit / bad config──▶ Faulted
//!     │                   │
//!     └──── cancel ───────┴──────────▶ Stopped
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod trading_loop;

pub use config::{LoopConfig, StrategyConfig};
pub use error::{StrategyError, StrategyResult};
pub use ports::{
    BoxFuture, DynFeatureEngine, DynOms, FeatureEngine, OrderManagementSystem, RecordingOms,
    ScriptedFeatureEngine,
};
pub use trading_loop::{LoopState, LoopStats, TradingLoop};
