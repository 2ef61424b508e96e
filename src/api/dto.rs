//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartDescription, ChartKind};
use crate::table::TableView;

// ============================================
// UPLOAD DTOs
// ============================================

/// Upload event from the upload control
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// `<content-type>,<base64 data>`, or null when no file is selected
    #[serde(default)]
    pub contents: Option<String>,
    /// Original file name, for logging only
    #[serde(default)]
    pub filename: Option<String>,
}

// ============================================
// CHART DTOs
// ============================================

/// Chart kind selection
#[derive(Debug, Deserialize)]
pub struct SelectKindRequest {
    /// One of the chart kind values, e.g. "bar"
    pub kind: String,
}

/// Current chart of a session
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    /// Chart description, null when there is nothing to draw
    pub chart: Option<ChartDescription>,
}

/// One dropdown option
#[derive(Debug, Serialize)]
pub struct ChartKindOption {
    /// Display label, e.g. "Bar Chart"
    pub label: String,
    /// Wire value, e.g. "bar"
    pub value: String,
}

impl From<ChartKind> for ChartKindOption {
    fn from(kind: ChartKind) -> Self {
        Self {
            label: kind.title().to_string(),
            value: kind.as_str().to_string(),
        }
    }
}

/// All chart kinds for the selection dropdown
#[derive(Debug, Serialize)]
pub struct ChartKindsResponse {
    /// Options in dropdown order
    pub options: Vec<ChartKindOption>,
    /// Initially selected value
    pub default: String,
}

// ============================================
// RENDER DTOs
// ============================================

/// Stateless one-shot render request
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// `<content-type>,<base64 data>`, or null
    #[serde(default)]
    pub contents: Option<String>,
    /// Chart kind; defaults to "bar"
    #[serde(default)]
    pub kind: Option<String>,
}

/// Table and chart for a render request
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub table: TableView,
    pub chart: Option<ChartDescription>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Number of live dashboard sessions
    pub sessions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
