//! Backend-independent chart descriptions

use serde::{Deserialize, Serialize};

use super::kind::ChartKind;
use crate::table::Value;

/// A renderable chart: kind, field bindings and title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub kind: ChartKind,
    pub title: String,
    pub encoding: Encoding,
}

/// A table column bound to a chart channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBinding {
    /// Column name
    pub field: String,
    /// Column values in row order
    pub values: Vec<Value>,
}

/// How table data maps onto the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Encoding {
    /// x/y charts: bar, scatter, line, area, bubble
    Cartesian {
        x: FieldBinding,
        y: FieldBinding,
        /// Marker size channel (bubble only)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<FieldBinding>,
    },
    /// Slice names and slice values
    Pie {
        names: FieldBinding,
        values: FieldBinding,
    },
    /// Literal matrix with axis labels
    Matrix {
        z: Vec<Vec<i64>>,
        x_labels: Vec<String>,
        y_labels: Vec<String>,
    },
}

impl ChartDescription {
    pub fn new(kind: ChartKind, encoding: Encoding) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            encoding,
        }
    }
}
