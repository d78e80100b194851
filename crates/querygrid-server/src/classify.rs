//! Outcome classification.
//!
//! Maps a completed request's result to at most one error class. Stateless;
//! precedence among stages is realized by the pipeline's stage order, so by
//! the time an error value reaches `classify` it already is the single
//! outcome of its request.

use querygrid_metrics::ErrorKind;

use crate::error::RequestError;

/// Message prefix marking an execution failure as an upstream-connectivity
/// problem. This is a preserved wire convention: matched verbatim by prefix,
/// never reinterpreted.
pub const FETCH_ERROR_PREFIX: &str = "FetchError: ";

/// Classify a request that ended at a pipeline stage.
pub fn classify(error: &RequestError) -> ErrorKind {
    match error {
        RequestError::MethodNotAllowed(_) => ErrorKind::MethodNotAllowed,
        // An unusable body never reached the query language; it counts
        // against the catch-all class.
        RequestError::UnreadableBody(_) => ErrorKind::GraphQl,
        RequestError::MissingQueryParameter => ErrorKind::MissingQueryParameter,
        RequestError::Syntax(_) => ErrorKind::Syntax,
        RequestError::Validation(_) => ErrorKind::Validation,
        RequestError::InvalidSchema(_) => ErrorKind::InvalidSchema,
    }
}

/// Classify a request that executed but surfaced field-level errors.
/// Returns `None` for a clean success (no class is emitted at all).
pub fn classify_execution(errors: &[String]) -> Option<ErrorKind> {
    if errors.is_empty() {
        return None;
    }
    if errors.iter().any(|m| m.starts_with(FETCH_ERROR_PREFIX)) {
        return Some(ErrorKind::Fetch);
    }
    Some(ErrorKind::GraphQl)
}
