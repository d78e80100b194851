//! Error class taxonomy.
//!
//! A closed set of tags classifying why a request did not succeed. Every
//! handled request is attributed exactly one class, or none (pure success).

use std::fmt;

/// Classification of a failed request outcome.
///
/// The set is closed: unknown labels are rejected at the intake boundary
/// (`ErrorKind::from_label`) rather than ever creating a new series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Execution produced field-level errors, or the request body was
    /// unusable (e.g. missing/empty content type).
    GraphQl,
    /// A schema (re)validation pass rejected the candidate schema.
    SchemaValidation,
    /// The query failed static validation against the active schema.
    Validation,
    /// The query text did not parse.
    Syntax,
    /// The request used a disallowed HTTP method.
    MethodNotAllowed,
    /// The request payload carried no query text.
    MissingQueryParameter,
    /// The active schema itself was structurally invalid at request time.
    InvalidSchema,
    /// Execution failed with an upstream-connectivity error.
    Fetch,
}

impl ErrorKind {
    /// All classes in stable exposition order.
    pub const ALL: [ErrorKind; 8] = [
        ErrorKind::GraphQl,
        ErrorKind::SchemaValidation,
        ErrorKind::Validation,
        ErrorKind::Syntax,
        ErrorKind::MethodNotAllowed,
        ErrorKind::MissingQueryParameter,
        ErrorKind::InvalidSchema,
        ErrorKind::Fetch,
    ];

    /// Wire label used in the `errorClass` exposition label and at the
    /// event-intake boundary.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::GraphQl => "graphql-error",
            ErrorKind::SchemaValidation => "schema-validation-error",
            ErrorKind::Validation => "validation-error",
            ErrorKind::Syntax => "syntax-error",
            ErrorKind::MethodNotAllowed => "method-not-allowed-error",
            ErrorKind::MissingQueryParameter => "missing-query-parameter-error",
            ErrorKind::InvalidSchema => "invalid-schema-error",
            ErrorKind::Fetch => "fetch-error",
        }
    }

    /// Parse a wire label. Returns `None` for anything outside the closed set.
    pub fn from_label(label: &str) -> Option<ErrorKind> {
        ErrorKind::ALL.iter().copied().find(|k| k.label() == label)
    }

    /// Dense index into per-class counter arrays.
    pub(crate) fn index(&self) -> usize {
        ErrorKind::ALL
            .iter()
            .position(|k| k == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
