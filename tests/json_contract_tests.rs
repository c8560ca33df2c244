use linechart_rs::ChartError;
use linechart_rs::api::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartView, ChartViewConfig, FallbackReason,
    parse_charts_json,
};
use linechart_rs::core::{Margins, Normalize, Viewport};
use linechart_rs::interaction::{ZoomBehavior, ZoomGesture};
use linechart_rs::render::{Color, NullRenderer, Palette};

const PAYLOAD: &str = r#"[
    {"title": "Temperatures", "data": [[0, [20.5, 18.0]], [60, [21.0, null]], [120, [22.5, 19.5]]]},
    {"title": "Empty", "data": []}
]"#;

#[test]
fn snapshot_contract_round_trips_through_versioned_envelope() {
    let charts = parse_charts_json(PAYLOAD).expect("payload");
    let mut view = ChartView::new(NullRenderer::default(), ChartViewConfig::default()).expect("view");
    view.set_chart(Some(charts[0].normalize())).expect("render");
    view.apply_gesture(ZoomGesture::ScaleTo {
        scale: 2.0,
        anchor_x: 970.0,
    })
    .expect("zoom");

    let snapshot = view.snapshot().expect("snapshot");
    assert_eq!(snapshot.title.as_deref(), Some("Temperatures"));
    assert_eq!(snapshot.series_lengths, vec![3, 2]);
    assert_eq!(snapshot.base_x_domain, Some((0.0, 120.0)));
    assert_eq!(snapshot.x_domain, Some((30.0, 90.0)));
    assert_eq!(snapshot.fallback, None);

    let json = view.snapshot_json_contract_v1_pretty().expect("json");
    assert!(json.contains("\"schema_version\": 1"));
    let restored = ChartSnapshot::from_json_compat_str(&json).expect("restore");
    assert_eq!(restored, snapshot);
}

#[test]
fn bare_snapshot_json_is_accepted() {
    let charts = parse_charts_json(PAYLOAD).expect("payload");
    let mut view = ChartView::new(NullRenderer::default(), ChartViewConfig::default()).expect("view");
    view.set_chart(Some(charts[1].normalize())).expect("render");

    let snapshot = view.snapshot().expect("snapshot");
    assert_eq!(snapshot.fallback, Some(FallbackReason::NoValidPoints));
    assert_eq!(snapshot.x_domain, None);

    let bare = serde_json::to_string(&snapshot).expect("bare json");
    assert_eq!(ChartSnapshot::from_json_compat_str(&bare).expect("restore"), snapshot);
}

#[test]
fn unsupported_snapshot_schema_is_rejected() {
    let view = ChartView::new(NullRenderer::default(), ChartViewConfig::default()).expect("view");
    let snapshot = view.snapshot().expect("snapshot");
    let payload = serde_json::json!({
        "schema_version": CHART_SNAPSHOT_JSON_SCHEMA_V1 + 1,
        "snapshot": snapshot,
    });

    let err = ChartSnapshot::from_json_compat_str(&payload.to_string()).expect_err("version");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn view_config_round_trips_through_json() {
    let config = ChartViewConfig::new(Viewport::new(1024, 512))
        .with_margins(Margins::new(20.0, 30.0, 40.0, 60.0))
        .with_palette(
            Palette::new(vec![Color::rgb(1.0, 0.5, 0.25), Color::rgba(0.0, 0.75, 0.5, 0.5)])
                .expect("palette"),
        )
        .with_zoom_behavior(ZoomBehavior {
            max_scale: 10.0,
            ..ZoomBehavior::default()
        })
        .with_fallback_message("Nothing to show");

    let json = config.to_json_pretty().expect("json");
    let restored = ChartViewConfig::from_json_str(&json).expect("restore");
    assert_eq!(restored, config);
    restored.validate().expect("valid");
}

#[test]
fn config_with_empty_palette_fails_to_load() {
    let err = ChartViewConfig::from_json_str(r#"{"palette": []}"#).expect_err("empty palette");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn raw_chart_serializes_back_to_row_arrays() {
    let charts = parse_charts_json(r#"[{"title": "t", "data": [[1, 2.5], [2, [1, null]], [3, null]]}]"#)
        .expect("payload");
    let json = serde_json::to_value(&charts[0]).expect("json");
    assert_eq!(
        json,
        serde_json::json!({"title": "t", "data": [[1.0, 2.5], [2.0, [1.0, null]], [3.0, null]]})
    );
}
