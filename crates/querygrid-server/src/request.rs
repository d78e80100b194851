//! Transport-agnostic request model.
//!
//! The HTTP layer adapts its request type into [`QueryRequest`]; everything
//! the pipeline needs is captured here so no axum/hyper types leak in.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One inbound query request, as handed over by the transport.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// HTTP method, uppercase (`"GET"`, `"POST"`, ...).
    pub method: String,
    /// Raw `content-type` header value, if the header was present.
    pub content_type: Option<String>,
    /// Raw request body.
    pub body: String,
    /// Decoded `query` URL parameter, for GET requests.
    pub query_param: Option<String>,
}

impl QueryRequest {
    /// A JSON POST request, the common case.
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_string(),
            content_type: Some("application/json".to_string()),
            body: body.into(),
            query_param: None,
        }
    }

    /// A GET request carrying the query in the URL.
    pub fn get(query: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            content_type: None,
            body: String::new(),
            query_param: Some(query.into()),
        }
    }

    /// Override the content-type header (including to an empty value, which
    /// models a client sending `content-type:` with no content).
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Override the HTTP method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }
}

/// JSON body of a POST request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryPayload {
    /// The query text. May be absent; the pipeline turns that into a
    /// missing-query-parameter outcome rather than a deserialization error.
    pub query: Option<String>,
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_parses_full_body() {
        let payload: QueryPayload = serde_json::from_str(
            r#"{"query":"query users{ users { userId } }","operationName":"users","variables":{"id":"1"}}"#,
        )
        .unwrap();
        assert!(payload.query.unwrap().starts_with("query users"));
        assert_eq!(payload.operation_name.as_deref(), Some("users"));
        assert_eq!(payload.variables["id"], "1");
    }

    #[test]
    fn payload_fields_are_optional() {
        let payload: QueryPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.query.is_none());
        assert!(payload.operation_name.is_none());
        assert!(payload.variables.is_empty());
    }

    #[test]
    fn post_builder_sets_json_content_type() {
        let request = QueryRequest::post("{}");
        assert_eq!(request.method, "POST");
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
    }
}
