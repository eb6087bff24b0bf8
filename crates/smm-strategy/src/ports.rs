//! Collaborator ports.
//!
//! The loop talks to the outside world through two traits:
//! - [`FeatureEngine`] turns recent market data into a (skew, spread) pair
//! - [`OrderManagementSystem`] reconciles resting orders against a ladder
//!
//! Both are object-safe so the application can inject real or scripted
//! implementations behind an `Arc`.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use smm_core::QuoteLadder;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Source of per-tick trading signals.
///
/// The loop calls `generate_skew` and then `generate_vol` once each per tick.
pub trait FeatureEngine: Send + Sync {
    /// Directional prediction, nominally in [-1, 1]. Positive = price expected up.
    fn generate_skew(&self) -> f64;

    /// Expected price deviation in price units, used as the raw spread.
    fn generate_vol(&self) -> f64;
}

/// Consumer of generated ladders.
///
/// Placement, amendment and cancellation failures are the OMS's concern;
/// the loop only awaits the hand-off.
pub trait OrderManagementSystem: Send + Sync {
    fn update(&self, ladder: QuoteLadder) -> BoxFuture<'_, ()>;
}

/// Arc wrapper for FeatureEngine trait objects.
pub type DynFeatureEngine = Arc<dyn FeatureEngine>;

/// Arc wrapper for OrderManagementSystem trait objects.
pub type DynOms = Arc<dyn OrderManagementSystem>;

/// Feature engine replaying a fixed script of signals.
///
/// Each `generate_skew` call advances to the next scripted pair; once the
/// script is exhausted the last pair repeats.
#[derive(Debug)]
pub struct ScriptedFeatureEngine {
    script: Mutex<VecDeque<(f64, f64)>>,
    current: Mutex<(f64, f64)>,
}

impl ScriptedFeatureEngine {
    /// Constant signal.
    pub fn constant(skew: f64, spread: f64) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            current: Mutex::new((skew, spread)),
        }
    }

    /// Replay `signals` in order, then hold the last one.
    pub fn from_script(signals: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let script: VecDeque<(f64, f64)> = signals.into_iter().collect();
        let current = script.front().copied().unwrap_or((0.0, 0.0));
        Self {
            script: Mutex::new(script),
            current: Mutex::new(current),
        }
    }

    /// Append a signal to the script.
    pub fn push(&self, skew: f64, spread: f64) {
        self.script.lock().push_back((skew, spread));
    }
}

impl FeatureEngine for ScriptedFeatureEngine {
    fn generate_skew(&self) -> f64 {
        let mut current = self.current.lock();
        if let Some(next) = self.script.lock().pop_front() {
            *current = next;
        }
        current.0
    }

    fn generate_vol(&self) -> f64 {
        self.current.lock().1
    }
}

/// OMS that records every ladder it receives.
#[derive(Debug, Default)]
pub struct RecordingOms {
    updates: Mutex<Vec<QuoteLadder>>,
}

impl RecordingOms {
    pub fn new() -> Self {
        Self::default()
    }

    /// All ladders received so far, oldest first.
    pub fn updates(&self) -> Vec<QuoteLadder> {
        self.updates.lock().clone()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().len()
    }

    pub fn last(&self) -> Option<QuoteLadder> {
        self.updates.lock().last().cloned()
    }
}

impl OrderManagementSystem for RecordingOms {
    fn update(&self, ladder: QuoteLadder) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.updates.lock().push(ladder);
        })
    }
}
