//! linechart-rs: multi-series time/value line charts with horizontal zoom.
//!
//! Raw `[timestamp, value]` rows are normalized into finite series, mapped
//! through d3-style linear scales and turned into backend-agnostic render
//! frames. A `ChartView` owns the per-surface state and redraws the whole
//! frame on every chart, viewport or zoom change.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartView, ChartViewConfig};
pub use error::{ChartError, ChartResult};
