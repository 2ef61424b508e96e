//! Chart Renderer
//!
//! Maps a (kind, table) pair to a [`ChartDescription`]. Column selection is
//! positional: column 0 is the category axis, column 1 the value axis.

use super::description::{ChartDescription, Encoding, FieldBinding};
use super::error::{ChartError, ChartResult};
use super::kind::ChartKind;
use crate::table::Table;

/// The heatmap ignores table values and always shows this matrix
pub const HEATMAP_MATRIX: [[i64; 2]; 2] = [[10, 15], [12, 7]];

/// Render a chart, or `None` when there is nothing to draw
///
/// Empty tables, missing columns and unknown kinds all yield `None`.
pub fn render(kind: &str, table: &Table) -> Option<ChartDescription> {
    match try_render(kind, table) {
        Ok(chart) => Some(chart),
        Err(e) => {
            tracing::debug!(kind = %kind, reason = %e, "No chart rendered");
            None
        }
    }
}

/// Render a chart from a kind string, reporting why nothing was drawn
pub fn try_render(kind: &str, table: &Table) -> ChartResult<ChartDescription> {
    if table.is_empty() {
        return Err(ChartError::EmptyTable);
    }
    let kind: ChartKind = kind.parse()?;
    try_render_kind(kind, table)
}

/// Render a chart for a known kind
pub fn try_render_kind(kind: ChartKind, table: &Table) -> ChartResult<ChartDescription> {
    if table.is_empty() {
        return Err(ChartError::EmptyTable);
    }
    if table.column_count() < kind.required_columns() {
        return Err(ChartError::InsufficientColumns {
            kind,
            required: kind.required_columns(),
            found: table.column_count(),
        });
    }

    let encoding = match kind {
        ChartKind::Heatmap => heatmap_encoding(table)?,
        ChartKind::Pie => Encoding::Pie {
            names: bind(kind, table, 0)?,
            values: bind(kind, table, 1)?,
        },
        ChartKind::Bubble => {
            let y = bind(kind, table, 1)?;
            Encoding::Cartesian {
                x: bind(kind, table, 0)?,
                size: Some(y.clone()),
                y,
            }
        }
        ChartKind::Bar | ChartKind::Scatter | ChartKind::Line | ChartKind::Area => {
            Encoding::Cartesian {
                x: bind(kind, table, 0)?,
                y: bind(kind, table, 1)?,
                size: None,
            }
        }
    };

    Ok(ChartDescription::new(kind, encoding))
}

fn bind(kind: ChartKind, table: &Table, index: usize) -> ChartResult<FieldBinding> {
    match (table.column(index), table.column_values(index)) {
        (Some(field), Some(values)) => Ok(FieldBinding {
            field: field.to_string(),
            values,
        }),
        _ => Err(ChartError::InsufficientColumns {
            kind,
            required: index + 1,
            found: table.column_count(),
        }),
    }
}

fn heatmap_encoding(table: &Table) -> ChartResult<Encoding> {
    let first = table.column(0).ok_or(ChartError::InsufficientColumns {
        kind: ChartKind::Heatmap,
        required: 1,
        found: 0,
    })?;

    Ok(Encoding::Matrix {
        z: HEATMAP_MATRIX.iter().map(|row| row.to_vec()).collect(),
        x_labels: vec![first.to_string(), "B".to_string()],
        y_labels: vec!["C".to_string(), "D".to_string()],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn xy_table() -> Table {
        Table::from_records(
            ["x", "y"],
            vec![vec![text("1"), text("2")], vec![text("3"), text("4")]],
        )
        .unwrap()
    }

    fn single_column_table() -> Table {
        Table::from_records(["only"], vec![vec![text("a")]]).unwrap()
    }

    fn expect_cartesian(chart: &ChartDescription) -> (&FieldBinding, &FieldBinding, Option<&FieldBinding>) {
        match &chart.encoding {
            Encoding::Cartesian { x, y, size } => (x, y, size.as_ref()),
            other => panic!("expected cartesian encoding, got {:?}", other),
        }
    }

    #[test]
    fn test_bar_chart_bindings() {
        let chart = render("bar", &xy_table()).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.title, "Bar Chart");

        let (x, y, size) = expect_cartesian(&chart);
        assert_eq!(x.field, "x");
        assert_eq!(x.values, vec![text("1"), text("3")]);
        assert_eq!(y.field, "y");
        assert_eq!(y.values, vec![text("2"), text("4")]);
        assert!(size.is_none());
    }

    #[test]
    fn test_cartesian_kinds_and_titles() {
        let table = xy_table();
        let cases = [
            ("scatter", "Scatter Plot"),
            ("line", "Line Chart"),
            ("area", "Area Chart"),
        ];

        for (kind, title) in cases {
            let chart = render(kind, &table).unwrap();
            assert_eq!(chart.title, title);
            let (x, y, size) = expect_cartesian(&chart);
            assert_eq!(x.field, "x");
            assert_eq!(y.field, "y");
            assert!(size.is_none());
        }
    }

    #[test]
    fn test_bubble_sizes_by_value_column() {
        let chart = render("bubble", &xy_table()).unwrap();
        assert_eq!(chart.title, "Bubble Chart");

        let (x, y, size) = expect_cartesian(&chart);
        assert_eq!(x.field, "x");
        assert_eq!(y.field, "y");
        assert_eq!(size, Some(y));
    }

    #[test]
    fn test_pie_names_and_values() {
        let chart = render("pie", &xy_table()).unwrap();
        assert_eq!(chart.title, "Pie Chart");

        match chart.encoding {
            Encoding::Pie { names, values } => {
                assert_eq!(names.field, "x");
                assert_eq!(values.field, "y");
                assert_eq!(values.values, vec![text("2"), text("4")]);
            }
            other => panic!("expected pie encoding, got {:?}", other),
        }
    }

    #[test]
    fn test_heatmap_ignores_table_values() {
        for table in [xy_table(), single_column_table()] {
            let chart = render("heatmap", &table).unwrap();
            assert_eq!(chart.title, "Heatmap");

            match chart.encoding {
                Encoding::Matrix {
                    z,
                    x_labels,
                    y_labels,
                } => {
                    assert_eq!(z, vec![vec![10, 15], vec![12, 7]]);
                    assert_eq!(x_labels[0], table.columns()[0]);
                    assert_eq!(x_labels[1], "B");
                    assert_eq!(y_labels, vec!["C", "D"]);
                }
                other => panic!("expected matrix encoding, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        let empty = Table::empty();
        for kind in ChartKind::all() {
            assert!(render(kind.as_str(), &empty).is_none());
        }
        assert_eq!(try_render("bar", &empty), Err(ChartError::EmptyTable));

        let header_only = Table::from_records(["x", "y"], Vec::new()).unwrap();
        assert!(render("heatmap", &header_only).is_none());
    }

    #[test]
    fn test_single_column_degrades_to_nothing() {
        let table = single_column_table();
        for kind in ChartKind::all() {
            if *kind == ChartKind::Heatmap {
                continue;
            }
            assert!(render(kind.as_str(), &table).is_none());
        }
        assert!(matches!(
            try_render("bar", &table),
            Err(ChartError::InsufficientColumns {
                required: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_unknown_kind_renders_nothing() {
        assert!(render("histogram", &xy_table()).is_none());
        assert_eq!(
            try_render("histogram", &xy_table()),
            Err(ChartError::UnknownKind("histogram".to_string()))
        );
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let table = Table::from_records(
            ["a", "b", "c"],
            vec![vec![text("1"), text("2"), text("3")]],
        )
        .unwrap();
        let chart = render("line", &table).unwrap();
        let (x, y, _) = expect_cartesian(&chart);
        assert_eq!(x.field, "a");
        assert_eq!(y.field, "b");
    }

    #[test]
    fn test_serialized_shape() {
        let chart = render("bubble", &xy_table()).unwrap();
        let json = serde_json::to_value(&chart).unwrap();

        assert_eq!(json["kind"], "bubble");
        assert_eq!(json["title"], "Bubble Chart");
        assert_eq!(json["encoding"]["layout"], "cartesian");
        assert_eq!(json["encoding"]["x"]["field"], "x");
        assert_eq!(json["encoding"]["size"]["field"], "y");
    }
}
