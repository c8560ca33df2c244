pub mod extent;
pub mod line_series;
pub mod normalize;
pub mod raw;
pub mod scale;
pub mod types;

pub use extent::{ChartScales, compute_chart_scales, x_extent, y_extent};
pub use line_series::{PixelPoint, project_all_series, project_polyline};
pub use normalize::{
    Normalize, NormalizationDiagnostics, Point, PreparedChart, Series, normalize_with_diagnostics,
    prepare_charts,
};
pub use raw::{RawChart, RawPoint, RawValue};
pub use scale::LinearScale;
pub use types::{Margins, PlotArea, Viewport};
