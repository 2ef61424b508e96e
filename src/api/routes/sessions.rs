//! Session Routes
//!
//! Endpoints that drive one dashboard session.
//!
//! - POST /api/v1/sessions - Start a session
//! - GET /api/v1/sessions/:id - Current table, kind and chart
//! - DELETE /api/v1/sessions/:id - End a session
//! - POST /api/v1/sessions/:id/upload - Upload event
//! - PUT /api/v1/sessions/:id/table - Client-edited table data
//! - PUT /api/v1/sessions/:id/kind - Chart kind selection
//! - GET /api/v1/sessions/:id/chart - Current chart only

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{ChartResponse, SelectKindRequest, UploadRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::session::SessionSnapshot;
use crate::table::TableView;

const MAX_KIND_LEN: usize = 64;

/// POST /api/v1/sessions
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<SessionSnapshot>)> {
    let snapshot = state.dashboard.create_session().await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionSnapshot>> {
    Ok(Json(state.dashboard.snapshot(&id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.dashboard.remove_session(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/upload
///
/// A payload that fails to decode leaves the session with an empty table;
/// the response is still 200.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> ApiResult<Json<SessionSnapshot>> {
    let Json(req) = body?;
    if let Some(filename) = &req.filename {
        tracing::debug!(session_id = %id, filename = %filename, "Upload received");
    }

    let snapshot = state
        .dashboard
        .upload(&id, req.contents.as_deref())
        .await?;
    Ok(Json(snapshot))
}

/// PUT /api/v1/sessions/:id/table
pub async fn replace_table(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<TableView>, JsonRejection>,
) -> ApiResult<Json<SessionSnapshot>> {
    let Json(view) = body?;
    Ok(Json(state.dashboard.replace_table(&id, view).await?))
}

/// PUT /api/v1/sessions/:id/kind
///
/// Unknown kinds are accepted and render no chart.
pub async fn select_kind(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<SelectKindRequest>, JsonRejection>,
) -> ApiResult<Json<SessionSnapshot>> {
    let Json(req) = body?;
    validate_kind(&req.kind)?;
    Ok(Json(state.dashboard.select_kind(&id, &req.kind).await?))
}

/// GET /api/v1/sessions/:id/chart
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ChartResponse>> {
    let snapshot = state.dashboard.snapshot(&id).await?;
    Ok(Json(ChartResponse {
        chart: snapshot.chart,
    }))
}

/// Reject kind strings no dropdown would ever send
pub(crate) fn validate_kind(kind: &str) -> ApiResult<()> {
    if kind.len() > MAX_KIND_LEN {
        return Err(ApiError::Validation(format!(
            "Chart kind exceeds maximum length of {} characters",
            MAX_KIND_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_kind() {
        assert!(validate_kind("bar").is_ok());
        assert!(validate_kind("anything-short").is_ok());
        assert!(validate_kind(&"x".repeat(65)).is_err());
    }
}
