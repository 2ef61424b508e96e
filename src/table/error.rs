//! Table error types

use thiserror::Error;

/// Errors raised while building a table
#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    /// A record does not have one field per column
    #[error("Row {row} has {found} fields, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type alias for table construction
pub type TableResult<T> = Result<T, TableError>;
