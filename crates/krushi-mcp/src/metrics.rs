//! Dispatch counters.
//!
//! Lock-free atomics recorded by [`super::ActionRegistry`] on every call.
//! They are observations only and never influence dispatch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Shared, thread-safe dispatch metrics.
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Dispatch calls received, including unknown names.
    pub total: AtomicU64,
    /// Calls whose handler returned successfully.
    pub succeeded: AtomicU64,
    /// Calls whose handler failed.
    pub failed: AtomicU64,
    /// Calls naming an unregistered action.
    pub unknown: AtomicU64,
}

/// A point-in-time copy of [`DispatchMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub unknown: u64,
}

impl DispatchMetrics {
    /// Creates zeroed metrics wrapped in an [`Arc`].
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Counts a dispatch before the name is resolved.
    pub fn record_attempt(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a handler that returned output.
    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a handler that failed, input validation included.
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a dispatch to an unregistered name.
    pub fn record_unknown(&self) {
        self.unknown.fetch_add(1, Ordering::Relaxed);
    }

    /// Reads all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total: self.total.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            unknown: self.unknown.load(Ordering::Relaxed),
        }
    }
}
