use crate::core::{LinearScale, PlotArea, Series, project_all_series};
use crate::render::{ClipRect, Palette, PolylinePrimitive};

#[derive(Debug, Clone, Copy)]
pub(super) struct LineSeriesRenderContext<'a> {
    pub plot_area: PlotArea,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub palette: &'a Palette,
    pub line_width: f64,
}

/// Turns every non-empty series into one clipped polyline colored by its
/// index in the palette.
#[must_use]
pub(super) fn build_line_series_primitives(
    series: &[Series],
    ctx: LineSeriesRenderContext<'_>,
) -> Vec<PolylinePrimitive> {
    let clip = ClipRect::from_plot_area(ctx.plot_area);
    project_all_series(series, ctx.x_scale, ctx.y_scale)
        .into_iter()
        .enumerate()
        .filter(|(_, points)| !points.is_empty())
        .map(|(series_index, points)| PolylinePrimitive {
            series_index,
            points,
            stroke_width: ctx.line_width,
            color: ctx.palette.color_for(series_index),
            clip,
        })
        .collect()
}
