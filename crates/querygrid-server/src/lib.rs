//! querygrid-server — the query-serving request pipeline.
//!
//! Runs each request through parse → validate → execute → respond, maps the
//! outcome to at most one error class, and reports it to the injected
//! metrics recorder. The execution engine, schema internals, and logger are
//! collaborators behind narrow seams, not part of this crate's job.
//!
//! # Architecture
//!
//! ```text
//! QueryServer
//!   ├── ArcSwap<ServerOptions>        ← schema/executor/logger hot-swap
//!   ├── handle_request()
//!   │   ├── pipeline stages (method → payload → parse → validate → execute)
//!   │   ├── classify() → at most one ErrorKind
//!   │   └── MetricsRecorder: record_error? + record_throughput
//!   └── set_options() → schema (re)validation pass → record_availability
//! ```
//!
//! Instrumentation is fire-and-forget: it can never fail a request, and an
//! outcome matching no known stage is treated as success.

pub mod classify;
pub mod error;
pub mod executor;
pub mod logger;
pub mod parse;
pub mod request;
pub mod schema;
pub mod server;

pub use classify::{FETCH_ERROR_PREFIX, classify, classify_execution};
pub use error::{QueryResponse, RequestError};
pub use executor::{ExecutionInput, ExecutionResult, QueryExecutor, RootExecutor};
pub use logger::{LogEntry, LogLevel, Logger, NoStacktraceLogger, TracingLogger};
pub use parse::{OperationKind, ParsedQuery, parse_query};
pub use request::{QueryPayload, QueryRequest};
pub use schema::{Schema, SchemaError};
pub use server::{QueryServer, ServerOptions};
