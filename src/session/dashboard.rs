//! Dashboard
//!
//! Owns all live sessions and the broadcast channel their chart updates are
//! published on. Created once at startup and shared with handlers via `Arc`.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use super::error::{SessionError, SessionResult};
use super::events::DashboardEvent;
use super::state::{Session, SessionId, SessionSnapshot, UploadOutcome};
use crate::chart::ChartKind;
use crate::table::TableView;

/// Configuration for the dashboard
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Chart kind selected in new sessions
    pub default_kind: String,
    /// Maximum number of live sessions
    pub max_sessions: usize,
    /// Capacity of the event broadcast channel
    pub event_capacity: usize,
    /// Sessions with no input change for this long are removed
    pub idle_ttl: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_kind: ChartKind::default().to_string(),
            max_sessions: 1000,
            event_capacity: 256,
            idle_ttl: Duration::from_secs(3600),
        }
    }
}

/// All dashboard sessions plus the update feed
pub struct Dashboard {
    sessions: RwLock<HashMap<SessionId, Session>>,
    events: broadcast::Sender<DashboardEvent>,
    config: DashboardConfig,
}

impl Dashboard {
    /// Create a dashboard with no sessions
    pub fn new(config: DashboardConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity);

        Self {
            sessions: RwLock::new(HashMap::new()),
            events,
            config,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Start a new session
    pub async fn create_session(&self) -> SessionResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            // Full: make room from idle sessions before refusing
            self.evict_idle(&mut sessions, Utc::now());
        }
        if sessions.len() >= self.config.max_sessions {
            return Err(SessionError::TooManySessions(self.config.max_sessions));
        }

        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone(), self.config.default_kind.clone());
        let snapshot = session.snapshot();
        sessions.insert(id.clone(), session);

        tracing::info!(session_id = %id, "Session created");
        Ok(snapshot)
    }

    /// End a session
    pub async fn remove_session(&self, id: &str) -> SessionResult<()> {
        self.sessions
            .write()
            .await
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        self.publish(DashboardEvent::SessionClosed {
            session_id: id.to_string(),
        });

        tracing::info!(session_id = %id, "Session removed");
        Ok(())
    }

    /// Current outputs of a session
    pub async fn snapshot(&self, id: &str) -> SessionResult<SessionSnapshot> {
        self.sessions
            .read()
            .await
            .get(id)
            .map(Session::snapshot)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Handle an upload event for a session
    ///
    /// Decode failures are logged and leave the session with an empty table.
    pub async fn upload(&self, id: &str, contents: Option<&str>) -> SessionResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        match session.upload(contents) {
            UploadOutcome::Loaded { columns, rows } => {
                tracing::info!(session_id = %id, columns, rows, "Upload decoded");
            }
            UploadOutcome::Cleared => {
                tracing::debug!(session_id = %id, "Upload cleared");
            }
            UploadOutcome::Rejected(e) => {
                tracing::warn!(
                    session_id = %id,
                    error_code = e.code(),
                    error = %e,
                    "Upload rejected, showing empty table"
                );
            }
        }

        self.publish(chart_updated(session));
        Ok(session.snapshot())
    }

    /// Replace a session's table with client-edited data
    pub async fn replace_table(&self, id: &str, view: TableView) -> SessionResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        session.replace_table(view);
        tracing::debug!(
            session_id = %id,
            rows = session.table().row_count(),
            "Table replaced"
        );

        self.publish(chart_updated(session));
        Ok(session.snapshot())
    }

    /// Change a session's chart kind
    pub async fn select_kind(&self, id: &str, kind: &str) -> SessionResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        session.select_kind(kind);
        tracing::debug!(session_id = %id, kind = %kind, "Chart kind selected");

        self.publish(chart_updated(session));
        Ok(session.snapshot())
    }

    /// Remove sessions idle for longer than `idle_ttl` as of `now`
    ///
    /// Returns the number of sessions removed.
    pub async fn expire_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        self.evict_idle(&mut sessions, now)
    }

    /// Periodically expire idle sessions until the dashboard is dropped
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        let dashboard = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(dashboard) = dashboard.upgrade() else {
                    break;
                };
                let removed = dashboard.expire_idle(Utc::now()).await;
                if removed > 0 {
                    tracing::debug!(removed, "Idle session sweep");
                }
            }
        })
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, Session>, now: DateTime<Utc>) -> usize {
        // A TTL too large to represent never expires anything
        let Some(cutoff) = chrono::Duration::from_std(self.config.idle_ttl)
            .ok()
            .and_then(|ttl| now.checked_sub_signed(ttl))
        else {
            return 0;
        };

        let expired: Vec<SessionId> = sessions
            .iter()
            .filter(|(_, session)| session.updated_at() <= cutoff)
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            sessions.remove(id);
            self.publish(DashboardEvent::SessionClosed {
                session_id: id.clone(),
            });
            tracing::info!(session_id = %id, "Idle session expired");
        }

        expired.len()
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: DashboardEvent) {
        // No receivers is fine: nobody is watching this dashboard
        let _ = self.events.send(event);
    }
}

fn chart_updated(session: &Session) -> DashboardEvent {
    DashboardEvent::ChartUpdated {
        session_id: session.id().to_string(),
        kind: session.kind().to_string(),
        rows: session.table().row_count(),
        chart: session.chart().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};

    fn payload_for(csv: &str) -> String {
        format!("text/csv;base64,{}", STANDARD.encode(csv))
    }

    #[tokio::test]
    async fn test_create_and_remove() {
        let dashboard = Dashboard::new(DashboardConfig::default());

        let snapshot = dashboard.create_session().await.unwrap();
        assert_eq!(snapshot.kind, "bar");
        assert!(snapshot.chart.is_none());
        assert_eq!(dashboard.session_count().await, 1);

        dashboard.remove_session(&snapshot.session_id).await.unwrap();
        assert_eq!(dashboard.session_count().await, 0);

        let result = dashboard.remove_session(&snapshot.session_id).await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_session_limit() {
        let dashboard = Dashboard::new(DashboardConfig {
            max_sessions: 1,
            ..Default::default()
        });

        dashboard.create_session().await.unwrap();
        let result = dashboard.create_session().await;
        assert_eq!(result.unwrap_err(), SessionError::TooManySessions(1));
    }

    #[tokio::test]
    async fn test_expired_session_frees_a_slot() {
        let dashboard = Dashboard::new(DashboardConfig {
            max_sessions: 1,
            idle_ttl: Duration::from_secs(60),
            ..Default::default()
        });
        let old = dashboard.create_session().await.unwrap().session_id;
        let mut rx = dashboard.subscribe();

        assert_eq!(dashboard.expire_idle(Utc::now()).await, 0);
        assert!(dashboard.create_session().await.is_err());

        let later = Utc::now() + chrono::Duration::seconds(61);
        assert_eq!(dashboard.expire_idle(later).await, 1);
        assert!(matches!(
            rx.try_recv().unwrap(),
            DashboardEvent::SessionClosed { ref session_id } if *session_id == old
        ));

        dashboard.create_session().await.unwrap();
        assert!(dashboard.snapshot(&old).await.is_err());
    }

    #[tokio::test]
    async fn test_full_dashboard_evicts_idle_on_create() {
        let dashboard = Dashboard::new(DashboardConfig {
            max_sessions: 2,
            idle_ttl: Duration::ZERO,
            ..Default::default()
        });
        for _ in 0..5 {
            dashboard.create_session().await.unwrap();
        }
        assert!(dashboard.session_count().await <= 2);
    }

    #[tokio::test]
    async fn test_sweeper_stops_with_dashboard() {
        let dashboard = Arc::new(Dashboard::new(DashboardConfig::default()));
        let handle = dashboard.spawn_sweeper(Duration::from_millis(10));
        drop(dashboard);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_and_select_kind() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let id = dashboard.create_session().await.unwrap().session_id;

        let snapshot = dashboard
            .upload(&id, Some(&payload_for("x,y\n1,2\n3,4")))
            .await
            .unwrap();
        assert_eq!(snapshot.table.data.len(), 2);
        assert_eq!(snapshot.chart.unwrap().title, "Bar Chart");

        let snapshot = dashboard.select_kind(&id, "scatter").await.unwrap();
        assert_eq!(snapshot.kind, "scatter");
        assert_eq!(snapshot.chart.unwrap().title, "Scatter Plot");
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let a = dashboard.create_session().await.unwrap().session_id;
        let b = dashboard.create_session().await.unwrap().session_id;

        dashboard
            .upload(&a, Some(&payload_for("x,y\n1,2\n")))
            .await
            .unwrap();

        let other = dashboard.snapshot(&b).await.unwrap();
        assert!(other.table.data.is_empty());
        assert!(other.chart.is_none());
    }

    #[tokio::test]
    async fn test_updates_are_published() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let id = dashboard.create_session().await.unwrap().session_id;
        let mut rx = dashboard.subscribe();

        dashboard
            .upload(&id, Some(&payload_for("x,y\n1,2\n")))
            .await
            .unwrap();
        dashboard.select_kind(&id, "heatmap").await.unwrap();

        match rx.try_recv().unwrap() {
            DashboardEvent::ChartUpdated { kind, rows, chart, .. } => {
                assert_eq!(kind, "bar");
                assert_eq!(rows, 1);
                assert!(chart.is_some());
            }
            other => panic!("unexpected event {:?}", other),
        }

        let event = rx.try_recv().unwrap();
        assert_eq!(event.session_id(), id);
        assert!(matches!(
            event,
            DashboardEvent::ChartUpdated { ref kind, .. } if kind == "heatmap"
        ));
    }

    #[tokio::test]
    async fn test_bad_upload_publishes_empty_chart() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let id = dashboard.create_session().await.unwrap().session_id;
        let mut rx = dashboard.subscribe();

        let snapshot = dashboard
            .upload(&id, Some("text/csv;base64,@@@"))
            .await
            .unwrap();
        assert!(snapshot.table.columns.is_empty());
        assert!(snapshot.chart.is_none());

        assert!(matches!(
            rx.try_recv().unwrap(),
            DashboardEvent::ChartUpdated { chart: None, rows: 0, .. }
        ));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let result = dashboard.select_kind("missing", "bar").await;
        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }
}
