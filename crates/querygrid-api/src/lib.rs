//! querygrid-api — HTTP surface for QueryGrid.
//!
//! Provides axum route handlers for the query endpoint and the pull-based
//! metrics exposition the polling collector scrapes.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | ANY | `/graphql` | Handle a query request |
//! | GET | `/metrics` | Prometheus exposition |
//! | GET | `/api/v1/metrics` | Metrics snapshot as JSON |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get};
use querygrid_server::QueryServer;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub server: Arc<QueryServer>,
}

/// Build the complete router (query endpoint + metrics exposition).
pub fn build_router(server: Arc<QueryServer>) -> Router {
    let state = ApiState { server };

    Router::new()
        .route("/graphql", any(handlers::graphql))
        .route("/metrics", get(handlers::prometheus_metrics))
        .route("/api/v1/metrics", get(handlers::metrics_snapshot))
        .with_state(state)
}
