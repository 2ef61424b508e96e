//! Core tabular types
//!
//! - `Value`: A single cell (text, number or null)
//! - `Table`: Ordered columns plus rows keyed by column name
//! - `TableView`: Wire form consumed by table widgets

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::error::{TableError, TableResult};

/// A single cell value
///
/// CSV decoding only ever yields `Text` and `Null`. `Number` shows up when a
/// client replaces table data with JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
}

impl Value {
    /// Build a cell from raw CSV text. Empty cells are null.
    pub fn from_csv_field(field: &str) -> Self {
        if field.is_empty() {
            Value::Null
        } else {
            Value::Text(field.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric reading of the cell, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Null => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One row, keyed by column name
pub type Row = BTreeMap<String, Value>;

/// In-memory tabular data
///
/// Invariant: `columns` are unique and every row holds a value (possibly
/// null) for every column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// The "nothing uploaded" table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from a header and positional records
    ///
    /// Header names are made unique first. Every record must have exactly
    /// one field per column.
    pub fn from_records<I>(header: I, records: Vec<Vec<Value>>) -> TableResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let columns = dedupe_columns(header);

        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if record.len() != columns.len() {
                return Err(TableError::RowWidth {
                    row: index,
                    expected: columns.len(),
                    found: record.len(),
                });
            }
            rows.push(columns.iter().cloned().zip(record).collect());
        }

        Ok(Self { columns, rows })
    }

    /// Build a table from its wire form
    ///
    /// Rows are normalised against the declared columns: missing keys become
    /// null, keys that are not declared columns are dropped.
    pub fn from_view(view: TableView) -> Self {
        let columns = dedupe_columns(view.columns.into_iter().map(|c| c.id));

        let rows = view
            .data
            .into_iter()
            .map(|mut raw| {
                columns
                    .iter()
                    .map(|col| {
                        let value = raw.remove(col).unwrap_or(Value::Null);
                        (col.clone(), value)
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Name of the column at `index`
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Values of the column at `index`, in row order
    pub fn column_values(&self, index: usize) -> Option<Vec<Value>> {
        let name = self.columns.get(index)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(name).cloned().unwrap_or(Value::Null))
                .collect(),
        )
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there is nothing to chart (no rows or no columns)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Wire form for table widgets
    pub fn to_view(&self) -> TableView {
        TableView {
            columns: self
                .columns
                .iter()
                .map(|name| ColumnDef {
                    name: name.clone(),
                    id: name.clone(),
                })
                .collect(),
            data: self.rows.clone(),
        }
    }
}

/// Column definition as a table widget expects it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub id: String,
}

/// Table as sent to and received from clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub data: Vec<Row>,
}

/// Make header names unique
///
/// Repeats of `a` become `a.1`, `a.2`, ... skipping any name already taken.
pub fn dedupe_columns<I>(header: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::new();

    for name in header {
        let name: String = name.into();
        let unique = if seen.contains(&name) {
            let mut suffix = 1;
            loop {
                let candidate = format!("{}.{}", name, suffix);
                if !seen.contains(&candidate) {
                    break candidate;
                }
                suffix += 1;
            }
        } else {
            name
        };
        seen.insert(unique.clone());
        columns.push(unique);
    }

    columns
}
