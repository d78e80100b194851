//! HTTP handlers.
//!
//! The query handler adapts axum request parts into the transport-agnostic
//! `QueryRequest` and hands it to the pipeline; the metrics handlers are
//! read-only, idempotent views of recorder state.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::IntoResponse;
use tracing::debug;

use querygrid_metrics::{CONTENT_TYPE, render_prometheus};
use querygrid_server::QueryRequest;

use crate::ApiState;

/// ANY /graphql
pub async fn graphql(
    State(state): State<ApiState>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let request = QueryRequest {
        method: method.as_str().to_uppercase(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
        query_param: params.get("query").cloned(),
    };

    let response = state.server.handle_request(&request);
    debug!(method = %request.method, status = response.status, "query request handled");

    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body))
}

/// GET /metrics — Prometheus text exposition for the polling collector.
pub async fn prometheus_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let body = render_prometheus(&state.server.metrics().snapshot());
    debug!(bytes = body.len(), "metrics exposition scraped");
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body)
}

/// GET /api/v1/metrics — the same snapshot as JSON.
pub async fn metrics_snapshot(State(state): State<ApiState>) -> impl IntoResponse {
    Json(state.server.metrics().snapshot())
}
