//! Chart renderer error types
//!
//! None of these reach a user: the dashboard shows "no chart" for all of them.

use thiserror::Error;

use super::kind::ChartKind;

/// Reasons a chart could not be built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Table has no rows or no columns
    #[error("Table is empty")]
    EmptyTable,

    /// Table does not have the columns the kind binds to
    #[error("{kind} needs {required} columns, table has {found}")]
    InsufficientColumns {
        kind: ChartKind,
        required: usize,
        found: usize,
    },

    /// Kind string is not one of the supported chart kinds
    #[error("Unknown chart kind: {0}")]
    UnknownKind(String),
}

/// Result type alias for chart rendering
pub type ChartResult<T> = Result<T, ChartError>;
