//! queryd — the QueryGrid daemon.
//!
//! Single binary that assembles the subsystems:
//! - Metrics recorder (process-wide, injected)
//! - Query server (pipeline + outcome classification)
//! - HTTP surface (query endpoint + Prometheus exposition)
//!
//! # Usage
//!
//! ```text
//! queryd --port 4000
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use serde_json::{Value, json};
use tracing::info;

use querygrid_metrics::MetricsRecorder;
use querygrid_server::{QueryServer, RootExecutor, Schema, ServerOptions};

#[derive(Parser)]
#[command(name = "queryd", about = "QueryGrid daemon")]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value = "4000")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,queryd=debug,querygrid=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    run(cli.port).await
}

async fn run(port: u16) -> anyhow::Result<()> {
    info!("QueryGrid daemon starting");

    // ── Initialize subsystems ──────────────────────────────────

    // Metrics recorder: one instance for the process lifetime.
    let metrics = Arc::new(MetricsRecorder::new());
    info!("metrics recorder initialized");

    // Query server with the built-in user schema and resolvers.
    let server = Arc::new(QueryServer::new(
        ServerOptions::new(user_schema(), Arc::new(user_resolvers())),
        Arc::clone(&metrics),
    ));
    info!("query server initialized");

    // ── Start API server ───────────────────────────────────────

    let router = querygrid_api::build_router(server);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("QueryGrid daemon stopped");
    Ok(())
}

fn user_schema() -> Schema {
    Schema::with_query_fields(["users", "user", "returnError"])
        .and_mutation_fields(["login", "logout"])
}

fn user_resolvers() -> RootExecutor {
    let users = [
        json!({"userId": "1", "userName": "UserOne"}),
        json!({"userId": "2", "userName": "UserTwo"}),
    ];

    let all_users = users.to_vec();
    let by_id = users.to_vec();

    RootExecutor::new()
        .resolver("users", move |_| Ok(Value::Array(all_users.clone())))
        .resolver("user", move |variables| {
            let id = variables.get("id").and_then(Value::as_str).unwrap_or("");
            by_id
                .iter()
                .find(|u| u["userId"] == id)
                .cloned()
                .ok_or_else(|| format!("User for userid={id} was not found"))
        })
        .resolver("returnError", |_| Err("Something went wrong!".to_string()))
        .resolver("logout", |_| Ok(json!({"result": "Goodbye!"})))
}
