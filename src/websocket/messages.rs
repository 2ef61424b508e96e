//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! dashboard clients and the Chartboard server.

use serde::{Deserialize, Serialize};

use crate::chart::ChartDescription;
use crate::session::{DashboardEvent, SessionSnapshot};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Change the session's chart kind
    SelectKind {
        /// Chart kind, e.g. "bar"
        kind: String,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Session this connection follows
        session_id: String,
    },
    /// The session's chart was recomputed
    ChartUpdated {
        /// Selected chart kind
        kind: String,
        /// Number of table rows the chart was built from
        rows: usize,
        /// New chart, or null when there is nothing to draw
        chart: Option<ChartDescription>,
    },
    /// The session was removed; the server closes the connection next
    SessionClosed,
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    /// Chart state of a session as it is right now
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        ServerMessage::ChartUpdated {
            kind: snapshot.kind.clone(),
            rows: snapshot.table.data.len(),
            chart: snapshot.chart.clone(),
        }
    }
}

impl From<DashboardEvent> for ServerMessage {
    fn from(event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::ChartUpdated {
                kind, rows, chart, ..
            } => ServerMessage::ChartUpdated { kind, rows, chart },
            DashboardEvent::SessionClosed { .. } => ServerMessage::SessionClosed,
        }
    }
}
