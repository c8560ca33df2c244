use serde::{Deserialize, Serialize};

use crate::core::normalize::{Point, Series};
use crate::core::scale::LinearScale;
use crate::core::types::PlotArea;
use crate::error::ChartResult;

/// Min/max of `timestamp` over every point of every series.
///
/// Returns `None` when no series holds a point.
#[must_use]
pub fn x_extent(series: &[Series]) -> Option<(f64, f64)> {
    extent_by(series, |point| point.timestamp)
}

/// Min/max of `value` over every point of every series.
#[must_use]
pub fn y_extent(series: &[Series]) -> Option<(f64, f64)> {
    extent_by(series, |point| point.value)
}

fn extent_by(series: &[Series], field: impl Fn(&Point) -> f64) -> Option<(f64, f64)> {
    series
        .iter()
        .flat_map(Series::points)
        .map(field)
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Shared coordinate system of one chart render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub raw_x_domain: (f64, f64),
    pub raw_y_domain: (f64, f64),
}

/// Builds the x scale over the raw time extent and the y scale over the
/// niced value extent, both mapped into the plot area.
///
/// Returns `Ok(None)` when the series hold no points; callers render the
/// fallback state instead.
pub fn compute_chart_scales(
    series: &[Series],
    plot_area: PlotArea,
    y_tick_count: usize,
) -> ChartResult<Option<ChartScales>> {
    let (Some(raw_x_domain), Some(raw_y_domain)) = (x_extent(series), y_extent(series)) else {
        return Ok(None);
    };

    let x = LinearScale::new(raw_x_domain, plot_area.x_range())?;
    let y = LinearScale::new(raw_y_domain, plot_area.y_range())?.nice(y_tick_count);

    Ok(Some(ChartScales {
        x,
        y,
        raw_x_domain,
        raw_y_domain,
    }))
}
