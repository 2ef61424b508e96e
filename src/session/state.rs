//! Per-session dashboard state
//!
//! A session holds the current table, the selected chart kind and the chart
//! computed from the two. Every change to an input recomputes the chart.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::chart::{self, ChartDescription};
use crate::table::{Table, TableView};
use crate::upload::{decode_upload, UploadError};

/// Unique identifier for a dashboard session
pub type SessionId = String;

/// What an upload did to the table
#[derive(Debug)]
pub enum UploadOutcome {
    /// A new table replaced the old one
    Loaded { columns: usize, rows: usize },
    /// No file was given; the table is empty
    Cleared,
    /// Decoding failed; the table is empty
    Rejected(UploadError),
}

/// State owned by one dashboard session
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    table: Table,
    kind: String,
    chart: Option<ChartDescription>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a session with an empty table
    pub fn new(id: impl Into<SessionId>, kind: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            table: Table::empty(),
            kind: kind.into(),
            chart: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn chart(&self) -> Option<&ChartDescription> {
        self.chart.as_ref()
    }

    /// Time of the last input change
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Handle an upload event
    ///
    /// Any decode failure leaves the session with an empty table, the same
    /// state as "nothing uploaded yet".
    pub fn upload(&mut self, contents: Option<&str>) -> UploadOutcome {
        let outcome = match contents.map(decode_upload) {
            Some(Ok(table)) => {
                let outcome = UploadOutcome::Loaded {
                    columns: table.column_count(),
                    rows: table.row_count(),
                };
                self.table = table;
                outcome
            }
            Some(Err(e)) => {
                self.table = Table::empty();
                UploadOutcome::Rejected(e)
            }
            None => {
                self.table = Table::empty();
                UploadOutcome::Cleared
            }
        };

        self.refresh_chart();
        outcome
    }

    /// Replace the table with client-edited data
    pub fn replace_table(&mut self, view: TableView) {
        self.table = Table::from_view(view);
        self.refresh_chart();
    }

    /// Change the selected chart kind
    ///
    /// Kinds outside the fixed set are stored as given and render no chart.
    pub fn select_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
        self.refresh_chart();
    }

    fn refresh_chart(&mut self) {
        self.chart = chart::render(&self.kind, &self.table);
        self.updated_at = Utc::now();
    }

    /// Serializable view of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            kind: self.kind.clone(),
            table: self.table.to_view(),
            chart: self.chart.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Session outputs as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub kind: String,
    pub table: TableView,
    pub chart: Option<ChartDescription>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};

    fn payload_for(csv: &str) -> String {
        format!("text/csv;base64,{}", STANDARD.encode(csv))
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new("s1", "bar");
        assert!(session.table().is_empty());
        assert!(session.chart().is_none());
        assert_eq!(session.kind(), "bar");
    }

    #[test]
    fn test_upload_then_chart() {
        let mut session = Session::new("s1", "bar");
        let outcome = session.upload(Some(&payload_for("x,y\n1,2\n3,4")));

        assert!(matches!(
            outcome,
            UploadOutcome::Loaded {
                columns: 2,
                rows: 2
            }
        ));
        let chart = session.chart().unwrap();
        assert_eq!(chart.title, "Bar Chart");
    }

    #[test]
    fn test_failed_upload_resets_table() {
        let mut session = Session::new("s1", "bar");
        session.upload(Some(&payload_for("x,y\n1,2\n")));
        assert!(session.chart().is_some());

        let outcome = session.upload(Some("no separator here"));
        assert!(matches!(
            outcome,
            UploadOutcome::Rejected(UploadError::MalformedPayload)
        ));
        assert!(session.table().is_empty());
        assert!(session.chart().is_none());
    }

    #[test]
    fn test_absent_upload_clears() {
        let mut session = Session::new("s1", "bar");
        session.upload(Some(&payload_for("x,y\n1,2\n")));

        let outcome = session.upload(None);
        assert!(matches!(outcome, UploadOutcome::Cleared));
        assert!(session.table().is_empty());
        assert!(session.chart().is_none());
    }

    #[test]
    fn test_select_kind_recomputes() {
        let mut session = Session::new("s1", "bar");
        session.upload(Some(&payload_for("x,y\n1,2\n")));

        session.select_kind("pie");
        assert_eq!(session.chart().unwrap().title, "Pie Chart");

        session.select_kind("histogram");
        assert_eq!(session.kind(), "histogram");
        assert!(session.chart().is_none());
    }

    #[test]
    fn test_replace_table_recomputes() {
        let mut session = Session::new("s1", "line");
        let view: TableView = serde_json::from_str(
            r#"{"columns": [{"name": "t", "id": "t"}, {"name": "v", "id": "v"}],
                "data": [{"t": "1", "v": 10}]}"#,
        )
        .unwrap();

        session.replace_table(view);
        assert_eq!(session.table().row_count(), 1);
        assert_eq!(session.chart().unwrap().title, "Line Chart");
    }
}
