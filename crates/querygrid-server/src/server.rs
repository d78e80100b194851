//! The query server: pipeline orchestration and metrics emission.
//!
//! `QueryServer` owns nothing but seams: an atomically swappable options
//! snapshot (schema, executor, logger) and the injected metrics recorder.
//! Per request it emits exactly one recorder call sequence — zero-or-one
//! `record_error`, then exactly one `record_throughput`. Schema
//! (re)validation passes run on construction and on every options swap,
//! decoupled from request handling, and drive the availability gauge.

use std::sync::Arc;

use arc_swap::ArcSwap;
use querygrid_metrics::{ErrorKind, MetricsRecorder};
use tracing::info;

use crate::classify::{classify, classify_execution};
use crate::error::{QueryResponse, RequestError};
use crate::executor::{ExecutionInput, ExecutionResult, QueryExecutor};
use crate::logger::{LogEntry, LogLevel, Logger, TracingLogger};
use crate::parse::parse_query;
use crate::request::{QueryPayload, QueryRequest};
use crate::schema::Schema;

/// Everything a request handler needs, swapped as one unit so in-flight
/// requests see either the old or the new configuration, never a mix.
pub struct ServerOptions {
    pub schema: Schema,
    pub executor: Arc<dyn QueryExecutor>,
    pub logger: Arc<dyn Logger>,
}

impl ServerOptions {
    pub fn new(schema: Schema, executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            schema,
            executor,
            logger: Arc::new(TracingLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }
}

/// The request pipeline with its instrumentation.
pub struct QueryServer {
    options: ArcSwap<ServerOptions>,
    metrics: Arc<MetricsRecorder>,
}

impl QueryServer {
    /// Build the server and run the initial schema-validation pass.
    pub fn new(options: ServerOptions, metrics: Arc<MetricsRecorder>) -> Self {
        let server = Self {
            options: ArcSwap::from_pointee(options),
            metrics,
        };
        server.revalidate_schema();
        server
    }

    /// Swap the active options and re-run the schema-validation pass.
    pub fn set_options(&self, options: ServerOptions) {
        self.options.store(Arc::new(options));
        self.revalidate_schema();
    }

    /// The injected recorder, for the exposition surface.
    pub fn metrics(&self) -> &Arc<MetricsRecorder> {
        &self.metrics
    }

    /// Handle one request end to end. Instrumentation is a side effect and
    /// can never fail the request; an outcome matching no error stage is a
    /// success.
    pub fn handle_request(&self, request: &QueryRequest) -> QueryResponse {
        // One consistent options snapshot for the whole request.
        let options = self.options.load_full();

        let response = match run_pipeline(&options, request) {
            Ok(result) => {
                if let Some(kind) = classify_execution(&result.errors) {
                    self.metrics.record_error(kind);
                    options.logger.log(
                        LogEntry::new(LogLevel::Error, result.errors.join("; "))
                            .with_error_name(kind.label()),
                    );
                }
                QueryResponse::from_execution(result.data, &result.errors)
            }
            Err(error) => {
                let kind = classify(&error);
                self.metrics.record_error(kind);
                options.logger.log(
                    LogEntry::new(LogLevel::Error, error.to_string())
                        .with_error_name(kind.label()),
                );
                QueryResponse::from_error(&error)
            }
        };

        self.metrics.record_throughput();
        response
    }

    /// Schema (re)validation pass: overwrite the availability gauge; a
    /// failing pass also counts one schema-validation-error.
    fn revalidate_schema(&self) {
        let options = self.options.load();
        match options.schema.validate() {
            Ok(()) => {
                self.metrics.record_availability(true);
                info!("schema validation pass succeeded");
            }
            Err(error) => {
                self.metrics.record_availability(false);
                self.metrics.record_error(ErrorKind::SchemaValidation);
                options.logger.log(
                    LogEntry::new(LogLevel::Error, error.to_string())
                        .with_error_name(ErrorKind::SchemaValidation.label()),
                );
            }
        }
    }
}

/// Run the pipeline stages in classification-precedence order; the first
/// failing stage owns the request's outcome.
fn run_pipeline(
    options: &ServerOptions,
    request: &QueryRequest,
) -> Result<ExecutionResult, RequestError> {
    if request.method != "GET" && request.method != "POST" {
        return Err(RequestError::MethodNotAllowed(request.method.clone()));
    }

    let payload = extract_payload(request)?;

    let query = match payload.query.as_deref().map(str::trim) {
        Some(query) if !query.is_empty() => query.to_string(),
        _ => return Err(RequestError::MissingQueryParameter),
    };

    let parsed = parse_query(&query).map_err(RequestError::Syntax)?;

    // A broken schema cannot validate any query; the request that reaches
    // this point with well-formed syntax discovers the invalid schema.
    if let Err(error) = options.schema.validate() {
        return Err(RequestError::InvalidSchema(error.0));
    }

    let diagnostics = options.schema.validate_query(&parsed);
    if !diagnostics.is_empty() {
        return Err(RequestError::Validation(diagnostics.join("; ")));
    }

    Ok(options.executor.execute(&ExecutionInput {
        query: &parsed,
        raw_query: &query,
        operation_name: payload.operation_name.as_deref(),
        variables: &payload.variables,
    }))
}

fn extract_payload(request: &QueryRequest) -> Result<QueryPayload, RequestError> {
    if request.method == "GET" {
        return Ok(QueryPayload {
            query: request.query_param.clone(),
            ..Default::default()
        });
    }

    let content_type = request.content_type.as_deref().unwrap_or("").trim();
    if content_type.starts_with("application/json") {
        serde_json::from_str(&request.body)
            .map_err(|error| RequestError::UnreadableBody(error.to_string()))
    } else if content_type.starts_with("application/graphql") {
        Ok(QueryPayload {
            query: Some(request.body.clone()),
            ..Default::default()
        })
    } else if content_type.is_empty() {
        Err(RequestError::UnreadableBody(
            "request carried no usable content-type header".to_string(),
        ))
    } else {
        Err(RequestError::UnreadableBody(format!(
            "unsupported content type '{content_type}'"
        )))
    }
}
