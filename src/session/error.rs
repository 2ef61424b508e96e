//! Session error types

use thiserror::Error;

/// Errors that can occur when working with dashboard sessions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// No live session has this id
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Session limit reached
    #[error("Too many sessions (limit: {0})")]
    TooManySessions(usize),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
