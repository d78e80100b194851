//! querygrid-metrics — request-outcome observability for QueryGrid.
//!
//! Tracks the outcome of every handled query request (throughput, one
//! counter per error class, a 0/1 schema-availability gauge) and provides
//! Prometheus-compatible text exposition.
//!
//! # Architecture
//!
//! ```text
//! MetricsRecorder
//!   ├── record_availability() ← called per schema (re)validation pass
//!   ├── record_error()        ← called at most once per request
//!   ├── record_throughput()   ← called exactly once per request
//!   └── snapshot() → MetricsSnapshot
//!
//! Prometheus exposition
//!   └── render_prometheus() → text/plain for /metrics endpoint
//! ```
//!
//! All counters are cumulative for the process lifetime; nothing is ever
//! reset. The recorder is lock-free (atomics only), so request handling is
//! never serialized behind metrics bookkeeping and a concurrent exposition
//! read never blocks writers.

pub mod kind;
pub mod prometheus;
pub mod recorder;

pub use kind::ErrorKind;
pub use prometheus::{CONTENT_TYPE, render_prometheus};
pub use recorder::{MetricsRecorder, MetricsSnapshot};
