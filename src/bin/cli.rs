//! Chartboard CLI
//!
//! Command-line interface for Chartboard:
//! - Render a local CSV file to a table and chart description
//! - List chart kinds
//! - Generate a config file

use anyhow::Context;
use chartboard::chart::{ChartDescription, ChartKind, Encoding};
use chartboard::config::LoggingConfig;
use chartboard::session::{Session, UploadOutcome};
use chartboard::table::Table;
use chartboard::telemetry::init_logging;
use chartboard::upload::UploadedPayload;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chartboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render CSV files into tables and chart descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log decode and render details to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a CSV file and build a chart from it
    Render {
        /// Path to CSV file
        path: PathBuf,
        /// Chart kind (bar, scatter, pie, line, area, bubble, heatmap)
        #[arg(short, long, default_value = "bar")]
        kind: String,
    },

    /// List chart kinds
    Kinds,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    table: chartboard::table::TableView,
    chart: Option<&'a ChartDescription>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&LoggingConfig {
        level: log_level(cli.verbose).to_string(),
        ..Default::default()
    });

    match cli.command {
        Commands::Render { path, kind } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("reading {}", path.display()))?;

            // Same pipeline as a browser upload
            let payload = UploadedPayload::from_csv_bytes(&bytes).encode();
            let mut session = Session::new("cli", kind);
            if let UploadOutcome::Rejected(e) = session.upload(Some(&payload)) {
                eprintln!("Could not read {}: {}", path.display(), e);
                eprintln!("Showing an empty table.");
                eprintln!();
            }

            if cli.format == "json" {
                let output = RenderOutput {
                    table: session.table().to_view(),
                    chart: session.chart(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_table(session.table());
                println!();
                match session.chart() {
                    Some(chart) => print_chart(chart),
                    None => println!("No chart for kind '{}'", session.kind()),
                }
            }
        }

        Commands::Kinds => {
            if cli.format == "json" {
                let kinds: Vec<_> = ChartKind::all()
                    .iter()
                    .map(|k| serde_json::json!({ "label": k.title(), "value": k.as_str() }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&kinds)?);
            } else {
                println!("{:<10} {}", "Value", "Label");
                println!("{}", "-".repeat(24));
                for kind in ChartKind::all() {
                    println!("{:<10} {}", kind.as_str(), kind.title());
                }
            }
        }

        Commands::Config { output } => {
            let config = chartboard::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    }
}

fn print_table(table: &Table) {
    if table.columns().is_empty() {
        println!("(empty table)");
        return;
    }

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .map(|col| {
            table
                .rows()
                .iter()
                .filter_map(|row| row.get(col))
                .map(|v| v.to_string().len())
                .chain(std::iter::once(col.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<width$}", col, width = w))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(header.join("  ").len()));

    for row in table.rows() {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .zip(&widths)
            .map(|(col, w)| {
                let value = row.get(col).map(|v| v.to_string()).unwrap_or_default();
                format!("{:<width$}", value, width = w)
            })
            .collect();
        println!("{}", cells.join("  "));
    }

    println!();
    println!("{} rows x {} columns", table.row_count(), table.column_count());
}

fn print_chart(chart: &ChartDescription) {
    println!("{} ({})", chart.title, chart.kind);
    match &chart.encoding {
        Encoding::Cartesian { x, y, size } => {
            println!("  x: {} ({} values)", x.field, x.values.len());
            println!("  y: {} ({} values)", y.field, y.values.len());
            if let Some(size) = size {
                println!("  size: {}", size.field);
            }
        }
        Encoding::Pie { names, values } => {
            println!("  names: {}", names.field);
            println!("  values: {}", values.field);
        }
        Encoding::Matrix {
            z,
            x_labels,
            y_labels,
        } => {
            println!("  x labels: {}", x_labels.join(", "));
            println!("  y labels: {}", y_labels.join(", "));
            for row in z {
                let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                println!("  {}", cells.join(" "));
            }
        }
    }
}
