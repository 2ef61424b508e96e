//! WebSocket Chart Feed
//!
//! Streams a session's chart updates to dashboard clients.
//!
//! ## Architecture
//!
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! Updates come from the [`Dashboard`](crate::session::Dashboard) broadcast
//! channel, filtered down to the connection's session.
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket(`ws://localhost:8050/api/v1/sessions/${id}/ws`);
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'select_kind', kind: 'pie'}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'chart_updated') draw(msg.chart);
//! };
//! ```

mod handler;
mod messages;

pub use handler::websocket_handler;
pub use messages::{ClientMessage, ServerMessage};
