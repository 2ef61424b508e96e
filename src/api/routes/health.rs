//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 503 once the session limit is reached, since new users
/// could not start a dashboard.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    let sessions = state.dashboard.session_count().await;
    if sessions < state.dashboard.config().max_sessions {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        sessions: state.dashboard.session_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::session::DashboardConfig;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_at_session_limit() {
        let state = Arc::new(AppState::with_dashboard_config(
            ApiConfig::default(),
            DashboardConfig {
                max_sessions: 1,
                ..Default::default()
            },
        ));
        assert_eq!(readiness(State(Arc::clone(&state))).await, StatusCode::OK);

        state.dashboard.create_session().await.unwrap();
        assert_eq!(
            readiness(State(state)).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
