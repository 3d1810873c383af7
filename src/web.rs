//! HTTP server wiring

use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};

/// Upper bound for one request, covering the slowest weather fan-out
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn run(state: AppState, port: u16) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(state))
        .layer(cors)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("EgoTrip API running at http://localhost:{}", port);
    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}
