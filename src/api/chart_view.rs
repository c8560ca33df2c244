use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    ChartScales, LinearScale, Normalize, PlotArea, PreparedChart, Viewport, compute_chart_scales,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{GestureBinding, GestureHub, ZoomController, ZoomGesture, ZoomTransform};
use crate::render::{
    AxisPrimitives, FrameKind, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::ChartViewConfig;
use super::axis_render_frame_builder::{build_x_axis, build_y_axis};
use super::line_series_render_frame_builder::{
    LineSeriesRenderContext, build_line_series_primitives,
};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

const FALLBACK_FONT_SIZE_PX: f64 = 14.0;

/// Why a redraw showed the fallback message instead of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// No chart is set.
    NoChart,
    /// The chart has no valid point in any series.
    NoValidPoints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderOutcome {
    Chart { series_drawn: usize },
    Fallback(FallbackReason),
}

/// Instance-scoped chart surface.
///
/// `ChartView` owns the prepared chart, its scales, the zoom state and the
/// gesture binding of one rendering surface. Two views never share state;
/// host events reach it through [`ChartView::set_chart`],
/// [`ChartView::resize`] and the gesture entry points, and each of them
/// ends in one complete redraw.
pub struct ChartView<R: Renderer> {
    renderer: R,
    config: ChartViewConfig,
    plot_area: PlotArea,
    chart: Option<PreparedChart>,
    scales: Option<ChartScales>,
    y_axis: AxisPrimitives,
    zoom: ZoomController,
    gesture_hub: Option<GestureHub>,
    binding: Option<GestureBinding>,
    last_frame: Option<RenderFrame>,
    last_outcome: Option<RenderOutcome>,
}

impl<R: Renderer> ChartView<R> {
    /// Creates an empty view. Nothing is drawn until the first event.
    pub fn new(mut renderer: R, config: ChartViewConfig) -> ChartResult<Self> {
        config.validate()?;
        let plot_area = PlotArea::resolve(config.viewport, config.margins)?;
        let zoom = ZoomController::new(config.zoom, plot_area.x_range())?;
        renderer.resize(config.viewport)?;

        Ok(Self {
            renderer,
            config,
            plot_area,
            chart: None,
            scales: None,
            y_axis: AxisPrimitives::default(),
            zoom,
            gesture_hub: None,
            binding: None,
            last_frame: None,
            last_outcome: None,
        })
    }

    /// Chart-changed event.
    ///
    /// Replaces the chart, recomputes scales, resets the zoom to identity,
    /// re-binds gestures and redraws.
    pub fn set_chart(&mut self, chart: Option<PreparedChart>) -> ChartResult<RenderOutcome> {
        let chart = chart.map(|chart| chart.normalize());
        debug!(
            title = chart.as_ref().map(|chart| chart.title.as_str()),
            series = chart.as_ref().map_or(0, |chart| chart.series.len()),
            points = chart.as_ref().map_or(0, PreparedChart::point_count),
            zoom_discarded = !self.zoom.transform().is_identity(),
            "chart changed"
        );

        self.chart = chart;
        self.zoom.reset();
        self.refresh_scales()?;
        self.rebind_gestures();
        self.render()
    }

    /// Viewport-changed event.
    ///
    /// The renderer is resized first and scales are recomputed for the new
    /// plot area; the current zoom is kept but re-constrained to the new extent.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<RenderOutcome> {
        let plot_area = PlotArea::resolve(viewport, self.config.margins)?;
        self.renderer.resize(viewport)?;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport changed"
        );

        self.config.viewport = viewport;
        self.plot_area = plot_area;
        self.zoom.set_extent(plot_area.x_range())?;
        self.refresh_scales()?;
        self.rebind_gestures();
        self.render()
    }

    /// Applies one gesture immediately and redraws when the transform
    /// changed. Gestures are ignored while the fallback is shown.
    pub fn apply_gesture(&mut self, gesture: ZoomGesture) -> ChartResult<bool> {
        if self.scales.is_none() {
            trace!(?gesture, "gesture ignored without chart scales");
            return Ok(false);
        }
        let changed = self.zoom.apply(gesture)?;
        if changed {
            self.render()?;
        }
        Ok(changed)
    }

    /// Subscribes this view to `hub`, replacing any previous subscription.
    pub fn attach_gestures(&mut self, hub: &GestureHub) {
        self.gesture_hub = Some(hub.clone());
        self.rebind_gestures();
    }

    /// Drops the gesture subscription; queued gestures are discarded.
    pub fn detach_gestures(&mut self) {
        self.binding = None;
        self.gesture_hub = None;
    }

    #[must_use]
    pub fn has_gesture_binding(&self) -> bool {
        self.binding.is_some()
    }

    /// Composes every queued gesture in arrival order and redraws once if
    /// any of them moved the transform. Returns whether a redraw happened.
    pub fn process_pending_gestures(&mut self) -> ChartResult<bool> {
        let changed = self.apply_pending_gestures();
        if changed {
            self.render()?;
        }
        Ok(changed)
    }

    /// Composes every queued gesture into the transform without redrawing.
    ///
    /// Hosts that draw on their own schedule (a GTK draw callback) call this
    /// right before rendering. Rejected gestures are logged and skipped.
    pub fn apply_pending_gestures(&mut self) -> bool {
        let Some(binding) = self.binding.as_ref() else {
            return false;
        };
        let gestures = binding.drain();
        if gestures.is_empty() {
            return false;
        }

        let mut changed = false;
        for gesture in &gestures {
            match self.zoom.apply(*gesture) {
                Ok(applied) => changed |= applied,
                Err(err) => warn!(error = %err, ?gesture, "rejected queued gesture"),
            }
        }
        trace!(gestures = gestures.len(), changed, "applied pending gestures");
        changed
    }

    /// Builds a complete frame for the current state and hands it to the
    /// renderer.
    pub fn render(&mut self) -> ChartResult<RenderOutcome> {
        let (frame, outcome) = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.finish_render(frame, outcome);
        Ok(outcome)
    }

    /// Renders the current frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<RenderOutcome>
    where
        R: CairoContextRenderer,
    {
        let (frame, outcome) = self.build_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.finish_render(frame, outcome);
        Ok(outcome)
    }

    #[must_use]
    pub fn config(&self) -> &ChartViewConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    #[must_use]
    pub fn chart(&self) -> Option<&PreparedChart> {
        self.chart.as_ref()
    }

    /// Base scales before any zoom is applied.
    #[must_use]
    pub fn scales(&self) -> Option<ChartScales> {
        self.scales
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    /// Visible x scale: the base x scale rescaled by the current transform.
    pub fn x_scale(&self) -> ChartResult<Option<LinearScale>> {
        self.scales
            .map(|scales| self.zoom.rescale_x(scales.x))
            .transpose()
    }

    #[must_use]
    pub fn y_scale(&self) -> Option<LinearScale> {
        self.scales.map(|scales| scales.y)
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn last_outcome(&self) -> Option<RenderOutcome> {
        self.last_outcome
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn refresh_scales(&mut self) -> ChartResult<()> {
        self.scales = match &self.chart {
            Some(chart) => {
                compute_chart_scales(&chart.series, self.plot_area, self.config.axis.y_tick_count)?
            }
            None => None,
        };
        self.y_axis = match self.scales {
            Some(scales) => build_y_axis(scales.y, self.plot_area, self.config.axis),
            None => AxisPrimitives::default(),
        };
        Ok(())
    }

    /// Drops the current binding before attaching a new one so handlers
    /// never stack. No binding is kept while the fallback is shown.
    fn rebind_gestures(&mut self) {
        self.binding = None;
        if self.scales.is_none() {
            return;
        }
        if let Some(hub) = &self.gesture_hub {
            self.binding = Some(hub.attach());
        }
    }

    fn build_frame(&self) -> ChartResult<(RenderFrame, RenderOutcome)> {
        let viewport = self.config.viewport;
        let Some(scales) = self.scales else {
            let reason = if self.chart.is_some() {
                FallbackReason::NoValidPoints
            } else {
                FallbackReason::NoChart
            };
            return Ok((self.fallback_frame(), RenderOutcome::Fallback(reason)));
        };
        let Some(chart) = &self.chart else {
            return Err(ChartError::InvalidData(
                "chart scales exist without a chart".to_owned(),
            ));
        };

        let x_scale = self.zoom.rescale_x(scales.x)?;
        let mut frame = RenderFrame::new(viewport, FrameKind::Chart, self.config.clear_color);
        frame.series = build_line_series_primitives(
            &chart.series,
            LineSeriesRenderContext {
                plot_area: self.plot_area,
                x_scale,
                y_scale: scales.y,
                palette: &self.config.palette,
                line_width: self.config.line_width,
            },
        );
        frame.x_axis = build_x_axis(x_scale, self.plot_area, self.config.axis);
        frame.y_axis = self.y_axis.clone();

        let outcome = RenderOutcome::Chart {
            series_drawn: frame.series.len(),
        };
        Ok((frame, outcome))
    }

    fn fallback_frame(&self) -> RenderFrame {
        let viewport = self.config.viewport;
        RenderFrame::new(viewport, FrameKind::Fallback, self.config.clear_color).with_text(
            TextPrimitive::new(
                self.config.fallback_message.clone(),
                f64::from(viewport.width) / 2.0,
                (f64::from(viewport.height) - FALLBACK_FONT_SIZE_PX) / 2.0,
                FALLBACK_FONT_SIZE_PX,
                self.config.axis.color,
                TextHAlign::Center,
            ),
        )
    }

    fn finish_render(&mut self, frame: RenderFrame, outcome: RenderOutcome) {
        let transform = self.zoom.transform();
        trace!(
            ?outcome,
            scale = transform.scale,
            translate_x = transform.translate_x,
            "chart redraw"
        );
        self.last_frame = Some(frame);
        self.last_outcome = Some(outcome);
    }
}
