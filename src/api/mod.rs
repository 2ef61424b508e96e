//! Chartboard REST API
//!
//! HTTP API layer for Chartboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard layout
//!
//! ## Charts
//! - `GET /api/v1/chart-kinds` - Chart kind dropdown options
//! - `POST /api/v1/render` - One-shot upload + render, no session
//!
//! ## Sessions
//! - `POST /api/v1/sessions` - Start a session
//! - `GET /api/v1/sessions/:id` - Table, kind and chart
//! - `DELETE /api/v1/sessions/:id` - End a session
//! - `POST /api/v1/sessions/:id/upload` - Upload a CSV payload
//! - `PUT /api/v1/sessions/:id/table` - Replace table data
//! - `PUT /api/v1/sessions/:id/kind` - Select chart kind
//! - `GET /api/v1/sessions/:id/chart` - Current chart
//!
//! ## WebSocket
//! - `GET /api/v1/sessions/:id/ws` - Chart update stream
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use chartboard::api::{serve, ApiConfig, AppState};
//! use chartboard::session::DashboardConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::with_dashboard_config(config.clone(), DashboardConfig::default());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Chart routes
        .route("/chart-kinds", get(routes::charts::list_kinds))
        .route("/render", post(routes::charts::render_once))
        // Session routes
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/:id",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        .route("/sessions/:id/upload", post(routes::sessions::upload))
        .route("/sessions/:id/table", put(routes::sessions::replace_table))
        .route("/sessions/:id/kind", put(routes::sessions::select_kind))
        .route("/sessions/:id/chart", get(routes::sessions::get_chart))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        // WebSocket route
        .route("/sessions/:id/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS policy: any origin unless a list is configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let sweep_every = state
        .dashboard
        .config()
        .idle_ttl
        .clamp(Duration::from_secs(1), Duration::from_secs(60));
    let sweeper = state.dashboard.spawn_sweeper(sweep_every);

    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Chartboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    sweeper.abort();
    tracing::info!("Chartboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
