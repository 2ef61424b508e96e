//! Chart Renderer
//!
//! Builds abstract chart descriptions from the current table and the
//! selected chart kind. Rendering to pixels is left to the display layer.
//!
//! - **kind**: The fixed set of chart kinds and their titles
//! - **description**: `ChartDescription` and its field bindings
//! - **renderer**: The kind-to-binding mapping
//! - **error**: Reasons no chart was produced
//!
//! # Mapping
//!
//! ```text
//!   bar | scatter | line | area   x = col[0], y = col[1]
//!   bubble                        x = col[0], y = col[1], size = col[1]
//!   pie                           names = col[0], values = col[1]
//!   heatmap                       [[10, 15], [12, 7]], x = [col[0], "B"], y = ["C", "D"]
//! ```

mod description;
mod error;
mod kind;
mod renderer;

pub use description::{ChartDescription, Encoding, FieldBinding};
pub use error::{ChartError, ChartResult};
pub use kind::ChartKind;
pub use renderer::{render, try_render, try_render_kind, HEATMAP_MATRIX};
