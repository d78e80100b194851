//! Logger capability.
//!
//! Components log through a capability trait rather than a concrete type,
//! so deployments can swap in alternate formatting by composition. The
//! default routes entries into `tracing`.

use std::fmt;

use tracing::{debug, error, info, warn};

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One structured log entry emitted by the pipeline.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Error class label, when the entry describes a classified failure.
    pub error_name: Option<String>,
    /// Captured stack trace, when the source error carried one.
    pub stacktrace: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            error_name: None,
            stacktrace: None,
        }
    }

    pub fn with_error_name(mut self, name: impl Into<String>) -> Self {
        self.error_name = Some(name.into());
        self
    }

    pub fn with_stacktrace(mut self, trace: impl Into<String>) -> Self {
        self.stacktrace = Some(trace.into());
        self
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_name {
            Some(name) => write!(f, "[{name}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// The logging capability consumed by the pipeline.
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);
}

/// Default logger: forwards entries to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, entry: LogEntry) {
        let message = entry.to_string();
        match entry.level {
            LogLevel::Debug => debug!(stacktrace = ?entry.stacktrace, "{message}"),
            LogLevel::Info => info!(stacktrace = ?entry.stacktrace, "{message}"),
            LogLevel::Warn => warn!(stacktrace = ?entry.stacktrace, "{message}"),
            LogLevel::Error => error!(stacktrace = ?entry.stacktrace, "{message}"),
        }
    }
}

/// Decorator that drops stack traces before delegating to the inner logger.
/// Composition replaces subclass overrides: wrap any logger to get the
/// stripped behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStacktraceLogger<L>(pub L);

impl<L: Logger> Logger for NoStacktraceLogger<L> {
    fn log(&self, mut entry: LogEntry) {
        entry.stacktrace = None;
        self.0.log(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Captures entries for assertions.
    #[derive(Default)]
    struct CapturingLogger {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl Logger for &CapturingLogger {
        fn log(&self, entry: LogEntry) {
            self.entries.lock().unwrap().push(entry);
        }
    }

    #[test]
    fn decorator_strips_stacktrace_and_delegates() {
        let inner = CapturingLogger::default();
        let logger = NoStacktraceLogger(&inner);

        logger.log(
            LogEntry::new(LogLevel::Error, "Something went wrong!")
                .with_error_name("graphql-error")
                .with_stacktrace("at resolver (users.rs:10)"),
        );

        let entries = inner.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].stacktrace.is_none());
        assert_eq!(entries[0].error_name.as_deref(), Some("graphql-error"));
        assert_eq!(entries[0].message, "Something went wrong!");
    }

    #[test]
    fn display_includes_error_name() {
        let entry = LogEntry::new(LogLevel::Warn, "boom").with_error_name("fetch-error");
        assert_eq!(entry.to_string(), "[fetch-error] boom");
    }
}
