mod axis_label_format;
mod axis_render_frame_builder;
mod chart_data;
mod chart_view;
mod chart_view_config;
mod line_series_render_frame_builder;
mod snapshot;

pub use axis_label_format::{format_tick_label, tick_label_precision};
pub use axis_render_frame_builder::{build_x_axis, build_y_axis};
pub use chart_data::parse_charts_json;
pub use chart_view::{ChartView, FallbackReason, RenderOutcome};
pub use chart_view_config::{
    AxisStyle, ChartViewConfig, DEFAULT_AXIS_FONT_SIZE_PX, DEFAULT_FALLBACK_MESSAGE,
    DEFAULT_LINE_WIDTH, DEFAULT_TICK_COUNT, DEFAULT_TICK_PADDING_PX, DEFAULT_TICK_SIZE_PX,
};
pub use snapshot::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1};

pub use crate::core::prepare_charts;
