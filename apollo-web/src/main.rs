// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Apollo-Proprietary
// See LICENSE in the repository root for full license terms.

//! Apollo Web Server
//!
//! Axum-based HTTP server for interactive time series forecasting:
//! 1. Serves the single-screen upload/configure/predict page
//! 2. Accepts forecast requests as JSON (CSV text + parameters)
//! 3. Returns either a JSON forecast or a rendered chart document
//!
//! Every request builds a fresh model and runs to completion; the server
//! holds no state between requests.

mod page;
mod routes;

use axum::response::{Html, Json};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apollo_web=info,tower_http=info".into()),
        )
        .init();

    let host = std::env::var("APOLLO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("APOLLO_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);

    let app = Router::new()
        .route("/", get(serve_page))
        .route("/health", get(health))
        .route("/chart", post(routes::forecast_chart))
        .route("/api/forecast", post(routes::forecast_api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!(
        "apollo-web v{} listening on http://{host}:{port}",
        env!("CARGO_PKG_VERSION")
    );
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve the interactive forecasting page.
async fn serve_page() -> Html<String> {
    Html(page::build_page())
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
