//! Events published when a session's outputs change

use serde::Serialize;

use crate::chart::ChartDescription;

/// Published on the dashboard's broadcast channel
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// Table or chart kind changed and the chart was recomputed
    ChartUpdated {
        session_id: String,
        kind: String,
        rows: usize,
        chart: Option<ChartDescription>,
    },
    /// Session was removed
    SessionClosed { session_id: String },
}

impl DashboardEvent {
    /// Session this event belongs to
    pub fn session_id(&self) -> &str {
        match self {
            DashboardEvent::ChartUpdated { session_id, .. } => session_id,
            DashboardEvent::SessionClosed { session_id } => session_id,
        }
    }
}
