use linechart_rs::api::{ChartView, ChartViewConfig};
use linechart_rs::core::{Point, PreparedChart, Series, Viewport};
use linechart_rs::render::{ClipRect, Color, FrameKind, NullRenderer, Palette, RenderFrame};

fn chart_with_series(count: usize) -> PreparedChart {
    let series = (0..count)
        .map(|index| {
            let offset = index as f64;
            Series::new(vec![
                Point::new(0.0, offset),
                Point::new(5.0, offset + 2.0),
                Point::new(10.0, offset + 1.0),
            ])
        })
        .collect();
    PreparedChart::new("multi", series)
}

fn render(chart: PreparedChart, config: ChartViewConfig) -> RenderFrame {
    let mut view = ChartView::new(NullRenderer::default(), config).expect("view");
    view.set_chart(Some(chart)).expect("render");
    view.last_frame().cloned().expect("frame")
}

#[test]
fn series_colors_cycle_through_palette() {
    let palette = Palette::default();
    let frame = render(chart_with_series(5), ChartViewConfig::default());

    assert_eq!(frame.kind, FrameKind::Chart);
    assert_eq!(frame.series.len(), 5);
    for polyline in &frame.series {
        assert_eq!(polyline.color, palette.color_for(polyline.series_index % 3));
    }
    assert_eq!(frame.series[3].color, frame.series[0].color);
    assert_eq!(frame.series[4].color, frame.series[1].color);
}

#[test]
fn injected_palette_and_line_width_are_used() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let config = ChartViewConfig::default()
        .with_palette(Palette::new(vec![red]).expect("palette"))
        .with_line_width(3.0);
    let frame = render(chart_with_series(2), config);

    assert!(frame.series.iter().all(|polyline| polyline.color == red));
    assert!(frame.series.iter().all(|polyline| polyline.stroke_width == 3.0));
}

#[test]
fn polylines_follow_series_order_and_are_clipped_to_plot_area() {
    let config = ChartViewConfig::new(Viewport::new(400, 300));
    let frame = render(chart_with_series(1), config);

    let polyline = &frame.series[0];
    assert_eq!(
        polyline.clip,
        ClipRect {
            x: 70.0,
            y: 50.0,
            width: 280.0,
            height: 200.0,
        }
    );
    let xs: Vec<f64> = polyline.points.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![70.0, 210.0, 350.0]);
    assert_eq!(polyline.segment_count(), 2);
}

#[test]
fn empty_series_emit_no_polyline_but_keep_color_slots() {
    let chart = PreparedChart::new(
        "gap",
        vec![
            Series::new(vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0)]),
            Series::default(),
            Series::new(vec![Point::new(0.0, 3.0)]),
        ],
    );
    let frame = render(chart, ChartViewConfig::default());
    let palette = Palette::default();

    assert_eq!(frame.series.len(), 2);
    assert_eq!(frame.series[1].series_index, 2);
    assert_eq!(frame.series[1].color, palette.color_for(2));
    assert_eq!(frame.series[1].segment_count(), 0);
}

#[test]
fn repeated_renders_of_unchanged_data_are_identical() {
    let mut view = ChartView::new(NullRenderer::default(), ChartViewConfig::default()).expect("view");
    view.set_chart(Some(chart_with_series(4))).expect("render");
    let first = view.last_frame().cloned().expect("first");
    view.render().expect("render again");
    assert_eq!(view.last_frame(), Some(&first));
    assert_eq!(view.renderer().frames_rendered, 2);
}
