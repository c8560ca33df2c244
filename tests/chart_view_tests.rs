use linechart_rs::ChartError;
use linechart_rs::api::{ChartView, ChartViewConfig, FallbackReason, RenderOutcome};
use linechart_rs::core::{
    Margins, Normalize, Point, PreparedChart, RawChart, RawPoint, RawValue, Series, Viewport,
};
use linechart_rs::interaction::{GestureHub, ZoomGesture, ZoomTransform};
use linechart_rs::render::{FrameKind, NullRenderer, RenderFrame, Renderer};
use linechart_rs::ChartResult;

fn view() -> ChartView<NullRenderer> {
    ChartView::new(NullRenderer::default(), ChartViewConfig::default()).expect("view")
}

fn sample_chart() -> PreparedChart {
    PreparedChart::new(
        "sample",
        vec![
            Series::new(vec![
                Point::new(0.0, 1.0),
                Point::new(50.0, 4.0),
                Point::new(100.0, 2.0),
            ]),
            Series::new(vec![Point::new(0.0, 3.0), Point::new(100.0, 5.0)]),
        ],
    )
}

#[test]
fn empty_chart_renders_fallback_without_scales() {
    let mut view = view();
    let chart = RawChart::new("scenario c", Vec::new()).normalize();

    let outcome = view.set_chart(Some(chart)).expect("render");
    assert_eq!(outcome, RenderOutcome::Fallback(FallbackReason::NoValidPoints));
    assert!(view.scales().is_none());

    let frame = view.last_frame().expect("frame");
    assert_eq!(frame.kind, FrameKind::Fallback);
    assert!(frame.series.is_empty());
    assert_eq!(frame.axis_line_count(), 0);
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, "No data available");

    let renderer = view.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_series_count, 0);
}

#[test]
fn absent_chart_reports_no_chart() {
    let mut view = view();
    view.set_chart(Some(sample_chart())).expect("chart");
    let outcome = view.set_chart(None).expect("clear");
    assert_eq!(outcome, RenderOutcome::Fallback(FallbackReason::NoChart));
    assert!(view.chart().is_none());
}

#[test]
fn zoom_request_of_twenty_five_is_clamped_to_twenty() {
    let mut view = view();
    view.set_chart(Some(sample_chart())).expect("chart");

    let changed = view
        .apply_gesture(ZoomGesture::ScaleTo {
            scale: 25.0,
            anchor_x: 970.0,
        })
        .expect("zoom");
    assert!(changed);
    assert_eq!(view.transform().scale, 20.0);
    assert_eq!(view.renderer().frames_rendered, 2);
}

#[test]
fn zoom_never_alters_y_scale() {
    let mut view = view();
    view.set_chart(Some(sample_chart())).expect("chart");
    let y_before = view.y_scale();

    view.apply_gesture(ZoomGesture::ScaleBy {
        factor: 5.0,
        anchor_x: 300.0,
    })
    .expect("zoom");
    view.apply_gesture(ZoomGesture::Drag { delta_x: -120.0 })
        .expect("pan");

    assert_eq!(view.y_scale(), y_before);
    let x_scale = view.x_scale().expect("rescale").expect("x scale");
    let (d0, d1) = x_scale.domain();
    assert!(d0 >= 0.0 && d1 <= 100.0 && d1 - d0 < 100.0);
}

#[test]
fn unchanged_transform_does_not_redraw() {
    let mut view = view();
    view.set_chart(Some(sample_chart())).expect("chart");
    let changed = view
        .apply_gesture(ZoomGesture::Drag { delta_x: 40.0 })
        .expect("drag at identity");
    assert!(!changed);
    assert_eq!(view.renderer().frames_rendered, 1);
}

#[test]
fn rejected_gesture_returns_error_and_keeps_state() {
    let mut view = view();
    view.set_chart(Some(sample_chart())).expect("chart");
    let err = view
        .apply_gesture(ZoomGesture::Drag { delta_x: f64::NAN })
        .expect_err("nan drag");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(view.transform(), ZoomTransform::IDENTITY);
}

#[test]
fn chart_change_resets_zoom() {
    let mut view = view();
    view.set_chart(Some(sample_chart())).expect("chart");
    view.apply_gesture(ZoomGesture::ScaleTo {
        scale: 4.0,
        anchor_x: 500.0,
    })
    .expect("zoom");

    view.set_chart(Some(sample_chart())).expect("new chart");
    assert_eq!(view.transform(), ZoomTransform::IDENTITY);
}

#[test]
fn resize_recomputes_scales_and_keeps_zoom_inside_new_extent() {
    let mut view = view();
    view.set_chart(Some(sample_chart())).expect("chart");
    view.apply_gesture(ZoomGesture::ScaleTo {
        scale: 2.0,
        anchor_x: 1870.0,
    })
    .expect("zoom");

    let outcome = view.resize(Viewport::new(800, 300)).expect("resize");
    assert_eq!(outcome, RenderOutcome::Chart { series_drawn: 2 });

    let scales = view.scales().expect("scales");
    assert_eq!(scales.x.range(), (70.0, 750.0));
    assert_eq!(scales.y.range(), (250.0, 50.0));
    assert_eq!(view.transform().scale, 2.0);

    let frame = view.last_frame().expect("frame");
    assert_eq!(frame.viewport, Viewport::new(800, 300));
    for polyline in &frame.series {
        assert_eq!(polyline.clip.width, 680.0);
    }
}

#[test]
fn resize_to_viewport_smaller_than_margins_fails() {
    let mut view = view();
    let err = view.resize(Viewport::new(100, 90)).expect_err("no plot area");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(view.viewport(), Viewport::new(1920, 400));
}

#[test]
fn invalid_config_is_rejected_on_construction() {
    let config = ChartViewConfig::default().with_line_width(0.0);
    assert!(ChartView::new(NullRenderer::default(), config).is_err());

    let config = ChartViewConfig::new(Viewport::new(200, 200))
        .with_margins(Margins::new(10.0, 10.0, 10.0, f64::NAN));
    let err = ChartView::new(NullRenderer::default(), config)
        .err()
        .expect("nan margin");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn views_do_not_share_state() {
    let mut first = view();
    let mut second = view();
    first.set_chart(Some(sample_chart())).expect("first");
    second.set_chart(Some(sample_chart())).expect("second");

    first
        .apply_gesture(ZoomGesture::ScaleTo {
            scale: 3.0,
            anchor_x: 970.0,
        })
        .expect("zoom first");
    assert_eq!(second.transform(), ZoomTransform::IDENTITY);
    assert_eq!(second.renderer().frames_rendered, 1);
}

#[test]
fn chart_whose_series_are_all_empty_renders_fallback_without_binding() {
    let hub = GestureHub::new();
    let mut view = view();
    view.attach_gestures(&hub);
    let chart = RawChart::new(
        "all invalid",
        vec![
            RawPoint::new(0.0, RawValue::Vector(vec![Some(f64::NAN), None])),
            RawPoint::new(1.0, RawValue::Vector(vec![None, None])),
        ],
    )
    .normalize();
    assert_eq!(chart.series.len(), 2);

    let outcome = view.set_chart(Some(chart)).expect("render");
    assert_eq!(outcome, RenderOutcome::Fallback(FallbackReason::NoValidPoints));
    assert!(view.scales().is_none());
    assert!(!view.has_gesture_binding());
    assert_eq!(hub.listener_count(), 0);
    assert_eq!(view.last_frame().expect("frame").kind, FrameKind::Fallback);
}

#[test]
fn values_near_f64_limits_render_without_error() {
    let mut view = view();
    let chart = PreparedChart::new(
        "extremes",
        vec![Series::new(vec![
            Point::new(0.0, -1e308),
            Point::new(1.0, 1e308),
        ])],
    );

    let outcome = view.set_chart(Some(chart)).expect("finite extremes");
    assert_eq!(outcome, RenderOutcome::Chart { series_drawn: 1 });
    let (y0, y1) = view.y_scale().expect("y scale").domain();
    assert!(y0.is_finite() && y1.is_finite());

    let wide_x = PreparedChart::new(
        "wide timestamps",
        vec![Series::new(vec![
            Point::new(-f64::MAX, 1.0),
            Point::new(f64::MAX, 2.0),
        ])],
    );
    view.set_chart(Some(wide_x)).expect("wide x render");
    view.apply_gesture(ZoomGesture::ScaleTo {
        scale: 4.0,
        anchor_x: 970.0,
    })
    .expect("zoom wide x");
    let (d0, d1) = view.x_scale().expect("rescale").expect("x").domain();
    assert!(d0.is_finite() && d1.is_finite() && d0 < d1);
}

#[derive(Default)]
struct SizeTrackingRenderer {
    sizes: Vec<Viewport>,
    frames: Vec<Viewport>,
}

impl Renderer for SizeTrackingRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        self.frames.push(frame.viewport);
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.sizes.push(viewport);
        Ok(())
    }
}

#[test]
fn renderer_is_resized_before_frames_of_a_new_viewport() {
    let config = ChartViewConfig::new(Viewport::new(640, 360));
    let mut view = ChartView::new(SizeTrackingRenderer::default(), config).expect("view");
    assert_eq!(view.renderer().sizes, vec![Viewport::new(640, 360)]);

    view.set_chart(Some(sample_chart())).expect("chart");
    view.resize(Viewport::new(800, 300)).expect("resize");
    assert!(view.resize(Viewport::new(100, 90)).is_err());

    let renderer = view.into_renderer();
    assert_eq!(
        renderer.sizes,
        vec![Viewport::new(640, 360), Viewport::new(800, 300)]
    );
    assert_eq!(
        renderer.frames,
        vec![Viewport::new(640, 360), Viewport::new(800, 300)]
    );
}
