use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::normalize::Series;
use crate::core::scale::LinearScale;

/// One polyline vertex in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps a series into connected polyline vertices in series order.
///
/// The projection is pure so rendering and tests consume the same geometry.
/// Points are not sorted; a series with out-of-order timestamps draws
/// backtracking segments.
#[must_use]
pub fn project_polyline(
    series: &Series,
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> Vec<PixelPoint> {
    series
        .points()
        .iter()
        .map(|point| PixelPoint::new(x_scale.map(point.timestamp), y_scale.map(point.value)))
        .collect()
}

/// Projects every series, keeping series order.
#[must_use]
pub fn project_all_series(
    series: &[Series],
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> Vec<Vec<PixelPoint>> {
    // Large multi-series charts can project each series independently.
    #[cfg(feature = "parallel-projection")]
    {
        series
            .par_iter()
            .map(|entry| project_polyline(entry, x_scale, y_scale))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        series
            .iter()
            .map(|entry| project_polyline(entry, x_scale, y_scale))
            .collect()
    }
}
