//! Table State
//!
//! The tabular data held by a dashboard session. It is produced by the
//! upload decoder, shown by the table view and read by the chart renderer.
//!
//! - **types**: `Table`, `Value`, `Row` and the `TableView` wire form
//! - **error**: Error types

mod error;
mod types;

pub use error::{TableError, TableResult};
pub use types::{dedupe_columns, ColumnDef, Row, Table, TableView, Value};
