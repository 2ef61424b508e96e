//! Chart kinds offered by the dashboard

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::ChartError;

/// The fixed set of chart kinds
///
/// Order matches the selection dropdown.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Scatter,
    Pie,
    Line,
    Area,
    Bubble,
    Heatmap,
}

impl ChartKind {
    /// All kinds in dropdown order
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Bar,
            ChartKind::Scatter,
            ChartKind::Pie,
            ChartKind::Line,
            ChartKind::Area,
            ChartKind::Bubble,
            ChartKind::Heatmap,
        ]
    }

    /// Wire value, e.g. `"bar"`
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::Bubble => "bubble",
            ChartKind::Heatmap => "heatmap",
        }
    }

    /// Chart title, also used as the dropdown label
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Bubble => "Bubble Chart",
            ChartKind::Heatmap => "Heatmap",
        }
    }

    /// Number of table columns this kind binds to
    pub fn required_columns(&self) -> usize {
        match self {
            ChartKind::Heatmap => 1,
            _ => 2,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChartError::UnknownKind(s.to_string()))
    }
}
