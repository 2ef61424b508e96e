//! Chart Routes
//!
//! - GET /api/v1/chart-kinds - Dropdown options
//! - POST /api/v1/render - Stateless upload + render

use axum::{extract::rejection::JsonRejection, Json};

use crate::api::dto::{ChartKindOption, ChartKindsResponse, RenderRequest, RenderResponse};
use crate::api::error::ApiResult;
use crate::api::routes::sessions::validate_kind;
use crate::chart::ChartKind;
use crate::session::{Session, UploadOutcome};

/// GET /api/v1/chart-kinds
pub async fn list_kinds() -> Json<ChartKindsResponse> {
    Json(ChartKindsResponse {
        options: ChartKind::all().iter().copied().map(ChartKindOption::from).collect(),
        default: ChartKind::default().to_string(),
    })
}

/// POST /api/v1/render
///
/// Runs the upload → table → chart pipeline once without keeping a session.
pub async fn render_once(
    body: Result<Json<RenderRequest>, JsonRejection>,
) -> ApiResult<Json<RenderResponse>> {
    let Json(req) = body?;
    let kind = req
        .kind
        .unwrap_or_else(|| ChartKind::default().to_string());
    validate_kind(&kind)?;

    let mut session = Session::new("render", kind);
    if let UploadOutcome::Rejected(e) = session.upload(req.contents.as_deref()) {
        tracing::warn!(error_code = e.code(), error = %e, "Render upload rejected");
    }

    Ok(Json(RenderResponse {
        table: session.table().to_view(),
        chart: session.chart().cloned(),
    }))
}
