//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use super::messages::{ClientMessage, ServerMessage};
use crate::api::routes::sessions::validate_kind;
use crate::api::{ApiResult, AppState};
use crate::session::{Dashboard, DashboardEvent, SessionSnapshot};

/// GET /api/v1/sessions/:id/ws
///
/// Upgrades to a WebSocket that streams chart updates for one session.
/// Unknown sessions are rejected before the upgrade.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    state.dashboard.snapshot(&session_id).await?;
    let dashboard = Arc::clone(&state.dashboard);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, dashboard, session_id)))
}

/// Subscribe to dashboard events, then read the session's current state
///
/// Every change after the returned snapshot arrives on the receiver.
/// `None` means the session ended before the connection was set up.
async fn open_feed(
    dashboard: &Dashboard,
    session_id: &str,
) -> (broadcast::Receiver<DashboardEvent>, Option<SessionSnapshot>) {
    let events = dashboard.subscribe();
    let snapshot = dashboard.snapshot(session_id).await.ok();
    (events, snapshot)
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, dashboard: Arc<Dashboard>, session_id: String) {
    let (mut sender, mut receiver) = socket.split();

    let (events, snapshot) = open_feed(&dashboard, &session_id).await;

    // Channel for everything this connection sends
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    let _ = tx.send(ServerMessage::Connected {
        session_id: session_id.clone(),
    });
    match &snapshot {
        Some(snapshot) => {
            let _ = tx.send(ServerMessage::from_snapshot(snapshot));
        }
        None => {
            let _ = tx.send(ServerMessage::SessionClosed);
        }
    }

    tracing::info!(session_id = %session_id, "WebSocket connected");

    let conn_id_for_send = session_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, ServerMessage::SessionClosed);
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            session_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
            if closing {
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
        }
    });

    // Task to forward this session's dashboard events
    let event_task = tokio::spawn(forward_events(events, session_id.clone(), tx.clone()));

    let dashboard_for_recv = Arc::clone(&dashboard);
    let session_for_recv = session_id.clone();

    // Task to receive messages from WebSocket and handle them
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&dashboard_for_recv, &session_for_recv, &tx, msg).await
                    {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // The send side finishes last so a SessionClosed message still goes out
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
            event_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
            event_task.abort();
        }
    }

    tracing::info!(session_id = %session_id, "WebSocket disconnected");
}

/// Pass one session's events on to the connection until it closes
async fn forward_events(
    mut events: broadcast::Receiver<DashboardEvent>,
    session_id: String,
    tx: mpsc::UnboundedSender<ServerMessage>,
) {
    loop {
        match events.recv().await {
            Ok(event) if event.session_id() == session_id => {
                let closing = matches!(event, DashboardEvent::SessionClosed { .. });
                if tx.send(ServerMessage::from(event)).is_err() || closing {
                    break;
                }
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(
                    session_id = %session_id,
                    skipped,
                    "WebSocket lagged behind dashboard events"
                );
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(
    dashboard: &Dashboard,
    session_id: &str,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    handle_client_message(dashboard, session_id, tx, client_msg).await;
                }
                Err(e) => {
                    tracing::debug!(
                        session_id = %session_id,
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    // Send error but keep connection open
                    let _ = tx.send(ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    });
                }
            }
            true
        }
        Message::Binary(_) => {
            let _ = tx.send(ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            });
            true
        }
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(session_id = %session_id, "Client requested close");
            false
        }
    }
}

/// Handle a parsed client message
async fn handle_client_message(
    dashboard: &Dashboard,
    session_id: &str,
    tx: &mpsc::UnboundedSender<ServerMessage>,
    message: ClientMessage,
) {
    match message {
        ClientMessage::SelectKind { kind } => {
            if let Err(e) = validate_kind(&kind) {
                let _ = tx.send(ServerMessage::Error {
                    message: e.to_string(),
                });
                return;
            }
            // The recomputed chart arrives through the event task
            if let Err(e) = dashboard.select_kind(session_id, &kind).await {
                tracing::debug!(session_id = %session_id, error = %e, "Select kind failed");
                let _ = tx.send(ServerMessage::Error {
                    message: e.to_string(),
                });
            }
        }
        ClientMessage::Ping => {
            let _ = tx.send(ServerMessage::Pong);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DashboardConfig;

    #[tokio::test]
    async fn test_select_kind_message_updates_session() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let id = dashboard.create_session().await.unwrap().session_id;
        let (tx, mut rx) = mpsc::unbounded_channel();

        let keep_open = handle_ws_message(
            &dashboard,
            &id,
            &tx,
            Message::Text(r#"{"type": "select_kind", "kind": "pie"}"#.to_string()),
        )
        .await;

        assert!(keep_open);
        assert_eq!(dashboard.snapshot(&id).await.unwrap().kind, "pie");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_ping_and_invalid_messages() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();

        handle_ws_message(&dashboard, "s1", &tx, Message::Text(r#"{"type":"ping"}"#.to_string()))
            .await;
        assert!(matches!(rx.try_recv().unwrap(), ServerMessage::Pong));

        handle_ws_message(&dashboard, "s1", &tx, Message::Text("nope".to_string())).await;
        assert!(matches!(rx.try_recv().unwrap(), ServerMessage::Error { .. }));
    }

    #[tokio::test]
    async fn test_overlong_kind_rejected() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let id = dashboard.create_session().await.unwrap().session_id;
        let (tx, mut rx) = mpsc::unbounded_channel();

        let text = serde_json::json!({ "type": "select_kind", "kind": "x".repeat(65) });
        handle_ws_message(&dashboard, &id, &tx, Message::Text(text.to_string())).await;

        assert!(matches!(rx.try_recv().unwrap(), ServerMessage::Error { .. }));
        assert_eq!(dashboard.snapshot(&id).await.unwrap().kind, "bar");
    }

    #[tokio::test]
    async fn test_feed_sees_changes_made_before_upgrade() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let id = dashboard.create_session().await.unwrap().session_id;

        // Change lands after the upgrade request was accepted
        dashboard.select_kind(&id, "pie").await.unwrap();

        let (_events, snapshot) = open_feed(&dashboard, &id).await;
        assert_eq!(snapshot.unwrap().kind, "pie");
    }

    #[tokio::test]
    async fn test_feed_forwards_changes_after_snapshot() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let id = dashboard.create_session().await.unwrap().session_id;
        let other = dashboard.create_session().await.unwrap().session_id;

        let (events, snapshot) = open_feed(&dashboard, &id).await;
        assert_eq!(snapshot.unwrap().kind, "bar");

        dashboard.select_kind(&other, "line").await.unwrap();
        dashboard.select_kind(&id, "scatter").await.unwrap();
        dashboard.remove_session(&id).await.unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        forward_events(events, id.clone(), tx).await;

        match rx.try_recv().unwrap() {
            ServerMessage::ChartUpdated { kind, .. } => assert_eq!(kind, "scatter"),
            other => panic!("unexpected message {:?}", other),
        }
        assert!(matches!(rx.try_recv().unwrap(), ServerMessage::SessionClosed));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_feed_for_ended_session() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let (_events, snapshot) = open_feed(&dashboard, "gone").await;
        assert!(snapshot.is_none());
    }

    #[tokio::test]
    async fn test_close_ends_connection() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let keep_open = handle_ws_message(&dashboard, "s1", &tx, Message::Close(None)).await;
        assert!(!keep_open);
    }
}
