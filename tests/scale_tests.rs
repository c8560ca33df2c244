use approx::assert_relative_eq;
use linechart_rs::ChartError;
use linechart_rs::core::{
    LinearScale, Margins, PlotArea, Point, Series, Viewport, compute_chart_scales,
};

fn series(points: &[(f64, f64)]) -> Series {
    Series::new(points.iter().map(|(t, v)| Point::new(*t, *v)).collect())
}

#[test]
fn linear_scale_maps_and_inverts_inverted_range() {
    let scale = LinearScale::new((0.0, 50.0), (350.0, 50.0)).expect("scale");
    assert_relative_eq!(scale.map(0.0), 350.0);
    assert_relative_eq!(scale.map(25.0), 200.0);
    assert_relative_eq!(scale.map(50.0), 50.0);
    assert_relative_eq!(scale.invert(200.0), 25.0);
}

#[test]
fn nice_iterates_until_step_is_stable() {
    let scale = LinearScale::new((-0.7, 12.3), (0.0, 1.0)).expect("scale");
    assert_eq!(scale.nice(10).domain(), (-2.0, 14.0));
}

#[test]
fn nice_handles_large_magnitudes() {
    let scale = LinearScale::new((1_234.0, 98_765.0), (0.0, 1.0)).expect("scale");
    assert_eq!(scale.nice(10).domain(), (0.0, 100_000.0));
}

#[test]
fn ticks_cover_domain_with_round_steps() {
    let scale = LinearScale::new((0.0, 1_000.0), (0.0, 500.0)).expect("scale");
    let ticks = scale.ticks(10);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks.first(), Some(&0.0));
    assert_eq!(ticks.last(), Some(&1_000.0));
    assert_eq!(scale.tick_step(10), 100.0);
}

#[test]
fn ticks_follow_reversed_domain_order() {
    let scale = LinearScale::new((10.0, 0.0), (0.0, 100.0)).expect("scale");
    let ticks = scale.ticks(5);
    assert_eq!(ticks, vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
}

#[test]
fn chart_scales_use_plot_area_ranges() {
    let area = PlotArea::resolve(Viewport::new(1920, 400), Margins::default()).expect("area");
    let all = vec![
        series(&[(100.0, 3.2), (200.0, 7.9)]),
        series(&[(150.0, -1.4)]),
    ];

    let scales = compute_chart_scales(&all, area, 10)
        .expect("scales")
        .expect("non-empty chart");

    assert_eq!(scales.raw_x_domain, (100.0, 200.0));
    assert_eq!(scales.raw_y_domain, (-1.4, 7.9));
    assert_eq!(scales.x.range(), (70.0, 1870.0));
    assert_eq!(scales.y.range(), (350.0, 50.0));
    assert_eq!(scales.y.domain(), (-2.0, 8.0));
    assert_relative_eq!(scales.x.map(150.0), 970.0);
}

#[test]
fn single_point_chart_gets_degenerate_domains_without_panicking() {
    let area = PlotArea::resolve(Viewport::new(400, 300), Margins::default()).expect("area");
    let scales = compute_chart_scales(&[series(&[(5.0, 2.0)])], area, 10)
        .expect("scales")
        .expect("one point");

    assert!(scales.x.is_degenerate());
    assert_relative_eq!(scales.x.map(5.0), 210.0);
    assert_relative_eq!(scales.y.map(2.0), 150.0);
}

#[test]
fn empty_series_produce_no_scales() {
    let area = PlotArea::resolve(Viewport::new(400, 300), Margins::default()).expect("area");
    let scales = compute_chart_scales(&[Series::default(), Series::default()], area, 10)
        .expect("scales");
    assert!(scales.is_none());
}

#[test]
fn margins_larger_than_viewport_are_rejected() {
    let err = PlotArea::resolve(Viewport::new(100, 80), Margins::new(50.0, 50.0, 50.0, 70.0))
        .expect_err("no plot area");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn map_and_invert_stay_finite_when_span_exceeds_f64_max() {
    let scale = LinearScale::new((-1e308, 1e308), (0.0, 100.0)).expect("scale");
    assert_relative_eq!(scale.map(-1e308), 0.0);
    assert_relative_eq!(scale.map(0.0), 50.0);
    assert_relative_eq!(scale.map(1e308), 100.0);
    assert_relative_eq!(scale.invert(50.0), 0.0);
    assert_relative_eq!(scale.invert(100.0), 1e308);

    let ticks = scale.ticks(10);
    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|tick| tick.is_finite()));
}

#[test]
fn nice_keeps_finite_bounds_near_f64_max() {
    for raw in [(0.0, 1.7e308), (-1e308, 1e308), (-f64::MAX, f64::MAX)] {
        let (n0, n1) = LinearScale::new(raw, (380.0, 20.0))
            .expect("scale")
            .nice(10)
            .domain();
        assert!(n0.is_finite() && n1.is_finite(), "{raw:?} niced to ({n0}, {n1})");
        assert!(n0 <= raw.0 && n1 >= raw.1);
    }
}

#[test]
fn with_range_keeps_domain_and_validates_pixels() {
    let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("scale");
    let moved = scale.with_range((70.0, 170.0)).expect("range");
    assert_eq!(moved.domain(), (0.0, 10.0));
    assert_relative_eq!(moved.map(5.0), 120.0);

    let err = scale.with_range((0.0, f64::INFINITY)).expect_err("infinite range");
    assert!(matches!(err, ChartError::InvalidData(_)));
}
