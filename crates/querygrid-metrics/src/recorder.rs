//! Metrics recorder — the single source of truth for counter/gauge state.
//!
//! Lock-free: every metric is an `AtomicU64`, updated with `fetch_add` /
//! `store` so unbounded concurrent request handlers never lose an increment
//! and never queue behind each other or behind an exposition read.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::warn;

use crate::kind::ErrorKind;

const KIND_COUNT: usize = ErrorKind::ALL.len();

/// Point-in-time read of all metrics state.
///
/// Per-counter values are exact; there is no cross-metric atomicity. A
/// snapshot taken mid-request may see the throughput counter already bumped
/// while the paired error counter is not yet, or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// 1 iff the currently active schema is structurally valid.
    pub availability: u64,
    /// Total fully handled requests, success or failure.
    pub request_throughput: u64,
    /// Per-class error counts, indexed in `ErrorKind::ALL` order.
    pub errors: [u64; KIND_COUNT],
}

impl MetricsSnapshot {
    /// Count for one error class.
    pub fn error_count(&self, kind: ErrorKind) -> u64 {
        self.errors[kind.index()]
    }

    /// All error classes with their counts, in stable order. Zero-valued
    /// classes are included; absence is not a valid representation of zero.
    pub fn error_counts(&self) -> impl Iterator<Item = (ErrorKind, u64)> + '_ {
        ErrorKind::ALL.iter().map(|k| (*k, self.errors[k.index()]))
    }
}

/// Process-wide recorder for request-outcome metrics.
///
/// Created once at startup and injected into every component that records
/// events; there is deliberately no ambient/static instance. State lives for
/// the whole process and is never reset.
#[derive(Debug)]
pub struct MetricsRecorder {
    /// Schema availability gauge: 0 or 1, overwritten per validation pass.
    availability: AtomicU64,
    /// Monotonic count of fully handled requests.
    request_throughput: AtomicU64,
    /// Monotonic per-class error counts, indexed in `ErrorKind::ALL` order.
    errors: [AtomicU64; KIND_COUNT],
}

impl MetricsRecorder {
    /// Create a recorder with the optimistic initial state: availability 1,
    /// every counter 0.
    pub fn new() -> Self {
        Self {
            availability: AtomicU64::new(1),
            request_throughput: AtomicU64::new(0),
            errors: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    /// Overwrite the availability gauge. Called on every schema
    /// (re)validation pass: at startup and on every accepted hot-swap.
    pub fn record_availability(&self, is_valid: bool) {
        self.availability
            .store(if is_valid { 1 } else { 0 }, Ordering::Relaxed);
    }

    /// Increment the throughput counter. Called exactly once per fully
    /// handled request, regardless of outcome.
    pub fn record_throughput(&self) {
        self.request_throughput.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the counter for one error class. Called at most once per
    /// request (a request has at most one attributed class).
    pub fn record_error(&self, kind: ErrorKind) {
        self.errors[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Label-keyed intake for events arriving from outside the typed API.
    /// Labels outside the closed set are dropped with a warning; a new
    /// series is never invented.
    pub fn record_error_label(&self, label: &str) {
        match ErrorKind::from_label(label) {
            Some(kind) => self.record_error(kind),
            None => warn!(%label, "dropping error event with unknown class label"),
        }
    }

    /// Consistent point-in-time read of all state. Never fails, never
    /// blocks writers.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            availability: self.availability.load(Ordering::Relaxed),
            request_throughput: self.request_throughput.load(Ordering::Relaxed),
            errors: std::array::from_fn(|i| self.errors[i].load(Ordering::Relaxed)),
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
