//! Execution seam.
//!
//! The query-execution engine is a collaborator: the pipeline hands it a
//! parsed query plus variables and gets back data and field-level error
//! messages. Swapping in a different executor (including a failing one) is
//! how tests and operators exercise the pipeline without a real engine.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::parse::ParsedQuery;

/// Everything an executor gets to see for one request.
pub struct ExecutionInput<'a> {
    pub query: &'a ParsedQuery,
    pub raw_query: &'a str,
    pub operation_name: Option<&'a str>,
    pub variables: &'a Map<String, Value>,
}

/// Outcome of executing one request: partial data plus field-level error
/// messages. Both may be populated at once.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
}

impl ExecutionResult {
    /// A result carrying only data.
    pub fn data(value: Value) -> Self {
        Self {
            data: Some(value),
            errors: Vec::new(),
        }
    }

    /// A result carrying only an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![message.into()],
        }
    }
}

/// The execution engine seam.
pub trait QueryExecutor: Send + Sync {
    fn execute(&self, input: &ExecutionInput<'_>) -> ExecutionResult;
}

/// Any matching closure is an executor; handy for tests and for forcing
/// upstream failures.
impl<F> QueryExecutor for F
where
    F: Fn(&ExecutionInput<'_>) -> ExecutionResult + Send + Sync,
{
    fn execute(&self, input: &ExecutionInput<'_>) -> ExecutionResult {
        self(input)
    }
}

/// Resolver function for one root field: variables in, field value out, or
/// an error message.
pub type Resolver =
    Arc<dyn Fn(&Map<String, Value>) -> Result<Value, String> + Send + Sync>;

/// Map-of-resolvers executor: runs each selected root field through its
/// resolver, collecting data and errors independently per field.
#[derive(Clone, Default)]
pub struct RootExecutor {
    resolvers: HashMap<String, Resolver>,
}

impl RootExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resolver for a root field.
    pub fn resolver<F>(mut self, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.resolvers.insert(field.into(), Arc::new(f));
        self
    }
}

impl QueryExecutor for RootExecutor {
    fn execute(&self, input: &ExecutionInput<'_>) -> ExecutionResult {
        let mut data = Map::new();
        let mut errors = Vec::new();

        for field in &input.query.root_fields {
            match self.resolvers.get(field) {
                Some(resolve) => match resolve(input.variables) {
                    Ok(value) => {
                        data.insert(field.clone(), value);
                    }
                    Err(message) => {
                        data.insert(field.clone(), Value::Null);
                        errors.push(message);
                    }
                },
                None => {
                    data.insert(field.clone(), Value::Null);
                    errors.push(format!("no resolver for field '{field}'"));
                }
            }
        }

        ExecutionResult {
            data: Some(Value::Object(data)),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_query;
    use serde_json::json;

    fn input<'a>(
        parsed: &'a ParsedQuery,
        raw: &'a str,
        variables: &'a Map<String, Value>,
    ) -> ExecutionInput<'a> {
        ExecutionInput {
            query: parsed,
            raw_query: raw,
            operation_name: None,
            variables,
        }
    }

    #[test]
    fn resolver_produces_field_data() {
        let executor = RootExecutor::new()
            .resolver("users", |_| Ok(json!([{"userId": "1", "userName": "UserOne"}])));

        let raw = "query users{ users { userId userName } }";
        let parsed = parse_query(raw).unwrap();
        let variables = Map::new();
        let result = executor.execute(&input(&parsed, raw, &variables));

        assert!(result.errors.is_empty());
        assert_eq!(result.data.unwrap()["users"][0]["userId"], "1");
    }

    #[test]
    fn failing_resolver_yields_null_field_and_error() {
        let executor = RootExecutor::new()
            .resolver("returnError", |_| Err("Something went wrong!".to_string()));

        let raw = "query returnError{ returnError { userId } }";
        let parsed = parse_query(raw).unwrap();
        let variables = Map::new();
        let result = executor.execute(&input(&parsed, raw, &variables));

        assert_eq!(result.errors, vec!["Something went wrong!".to_string()]);
        assert_eq!(result.data.unwrap()["returnError"], Value::Null);
    }

    #[test]
    fn resolver_sees_variables() {
        let executor = RootExecutor::new().resolver("user", |variables| {
            match variables.get("id").and_then(Value::as_str) {
                Some("1") => Ok(json!({"userId": "1", "userName": "UserOne"})),
                Some(other) => Err(format!("User for userid={other} was not found")),
                None => Err("User for userid= was not found".to_string()),
            }
        });

        let raw = "query user($id: String!) { user(id: $id) { userId } }";
        let parsed = parse_query(raw).unwrap();

        let mut variables = Map::new();
        variables.insert("id".to_string(), json!("1"));
        let result = executor.execute(&input(&parsed, raw, &variables));
        assert!(result.errors.is_empty());

        variables.insert("id".to_string(), json!("3"));
        let result = executor.execute(&input(&parsed, raw, &variables));
        assert_eq!(result.errors, vec!["User for userid=3 was not found".to_string()]);
    }

    #[test]
    fn closure_is_an_executor() {
        let executor =
            |_: &ExecutionInput<'_>| ExecutionResult::error("FetchError: connection refused");

        let raw = "{ users { userId } }";
        let parsed = parse_query(raw).unwrap();
        let variables = Map::new();
        let result = QueryExecutor::execute(&executor, &input(&parsed, raw, &variables));
        assert_eq!(result.errors.len(), 1);
    }
}
