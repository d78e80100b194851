//! Pipeline error and response types.

use serde_json::{Value, json};
use thiserror::Error;

/// One variant per pipeline stage that can end a request early. The stage
/// order in [`crate::server::QueryServer::handle_request`] realizes the
/// classification precedence: the first stage to fail owns the outcome.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    #[error("method '{0}' is not allowed, use GET or POST")]
    MethodNotAllowed(String),

    #[error("request body could not be interpreted: {0}")]
    UnreadableBody(String),

    #[error("request did not contain a query")]
    MissingQueryParameter,

    #[error("syntax error in query: {0}")]
    Syntax(String),

    #[error("query failed validation: {0}")]
    Validation(String),

    #[error("the active schema is invalid: {0}")]
    InvalidSchema(String),
}

impl RequestError {
    /// HTTP status the transport should answer with.
    pub fn status(&self) -> u16 {
        match self {
            RequestError::MethodNotAllowed(_) => 405,
            RequestError::UnreadableBody(_)
            | RequestError::MissingQueryParameter
            | RequestError::Syntax(_)
            | RequestError::Validation(_) => 400,
            RequestError::InvalidSchema(_) => 500,
        }
    }
}

/// Transport-agnostic response: a status code and a GraphQL-shaped JSON
/// body (`data` and/or an `errors` array of `{"message": ...}` objects).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub status: u16,
    pub body: Value,
}

impl QueryResponse {
    /// Successful execution: `data` plus any field-level errors. Field
    /// errors still answer 200, per GraphQL-over-HTTP convention.
    pub fn from_execution(data: Option<Value>, errors: &[String]) -> Self {
        let mut body = serde_json::Map::new();
        if let Some(data) = data {
            body.insert("data".to_string(), data);
        }
        if !errors.is_empty() {
            body.insert("errors".to_string(), error_array(errors));
        }
        Self {
            status: 200,
            body: Value::Object(body),
        }
    }

    /// A request that ended at a pipeline stage.
    pub fn from_error(error: &RequestError) -> Self {
        Self {
            status: error.status(),
            body: json!({ "errors": error_array(&[error.to_string()]) }),
        }
    }

    /// Messages from the `errors` array, for assertions and logging.
    pub fn error_messages(&self) -> Vec<String> {
        self.body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["message"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn error_array(messages: &[String]) -> Value {
    Value::Array(
        messages
            .iter()
            .map(|m| json!({ "message": m }))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_response_omits_empty_errors() {
        let response = QueryResponse::from_execution(Some(json!({"users": []})), &[]);
        assert_eq!(response.status, 200);
        assert!(response.body.get("errors").is_none());
        assert_eq!(response.body["data"]["users"], json!([]));
    }

    #[test]
    fn field_errors_still_answer_200() {
        let response =
            QueryResponse::from_execution(None, &["Something went wrong!".to_string()]);
        assert_eq!(response.status, 200);
        assert_eq!(
            response.error_messages(),
            vec!["Something went wrong!".to_string()]
        );
    }

    #[test]
    fn stage_errors_map_to_http_status() {
        let cases = [
            (RequestError::MethodNotAllowed("PUT".into()), 405),
            (RequestError::MissingQueryParameter, 400),
            (RequestError::Syntax("oops".into()), 400),
            (RequestError::InvalidSchema("no fields".into()), 500),
        ];
        for (error, status) in cases {
            assert_eq!(QueryResponse::from_error(&error).status, status);
        }
    }
}
