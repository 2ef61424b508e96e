//! Dashboard Sessions
//!
//! Explicit application state for the upload → table → chart pipeline.
//!
//! ## Architecture
//!
//! - **Dashboard**: Owns all sessions and publishes chart updates
//! - **Session**: One user's table, chart kind and computed chart
//! - **Events**: Messages published on every recompute
//!
//! ```text
//!   upload / table edit / kind change
//!        → Session updates its inputs
//!        → chart::render(kind, table)
//!        → DashboardEvent::ChartUpdated on the broadcast channel
//! ```

mod dashboard;
mod error;
mod events;
mod state;

pub use dashboard::{Dashboard, DashboardConfig};
pub use error::{SessionError, SessionResult};
pub use events::DashboardEvent;
pub use state::{Session, SessionId, SessionSnapshot, UploadOutcome};
