//! # Chartboard
//!
//! Upload a CSV file, pick a chart kind, get a data table and a chart
//! description back.
//!
//! ## Modules
//!
//! - [`upload`]: Decodes `<content-type>,<base64>` upload payloads into tables
//! - [`table`]: Tabular data held by a session
//! - [`chart`]: Maps (chart kind, table) to a chart description
//! - [`session`]: Per-user dashboard state and the chart update feed
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Chart update stream
//!
//! ## Quick Start
//!
//! ```rust
//! use chartboard::{chart, upload::UploadedPayload};
//!
//! let payload = UploadedPayload::from_csv_bytes(b"x,y\n1,2\n3,4\n");
//! let table = payload.decode().unwrap();
//!
//! let bar = chart::render("bar", &table).unwrap();
//! assert_eq!(bar.title, "Bar Chart");
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod session;
pub mod table;
pub mod telemetry;
pub mod upload;
pub mod websocket;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use chart::{ChartDescription, ChartError, ChartKind, Encoding, FieldBinding};

pub use config::{Config, ConfigError, LoggingConfig};

pub use session::{
    Dashboard, DashboardConfig, DashboardEvent, Session, SessionError, SessionSnapshot,
};

pub use table::{Table, TableView, Value};

pub use upload::{decode_upload, UploadError, UploadedPayload};

pub use websocket::{websocket_handler, ClientMessage, ServerMessage};
