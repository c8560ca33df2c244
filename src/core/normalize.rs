use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::raw::{RawChart, RawValue};

/// Normalized sample: both fields are always finite once produced by a
/// [`Normalize`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub timestamp: f64,
    pub value: f64,
}

impl Point {
    #[must_use]
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Returns a point only when both coordinates are finite.
    #[must_use]
    pub fn finite(timestamp: f64, value: f64) -> Option<Self> {
        (timestamp.is_finite() && value.is_finite()).then_some(Self { timestamp, value })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.timestamp.is_finite() && self.value.is_finite()
    }
}

/// Points of one series in original data order.
///
/// Order is never changed here: drawing follows input order, so callers that
/// need a monotone polyline must supply time-ordered rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` when timestamps never decrease.
    #[must_use]
    pub fn is_time_ordered(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }
}

impl From<Vec<Point>> for Series {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparedChart {
    pub title: String,
    pub series: Vec<Series>,
}

impl PreparedChart {
    #[must_use]
    pub fn new(title: impl Into<String>, series: Vec<Series>) -> Self {
        Self {
            title: title.into(),
            series,
        }
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    /// Returns `true` when no series holds a single valid point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.series.iter().all(Series::is_empty)
    }
}

/// Counters describing what a normalization pass discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationDiagnostics {
    /// Rows whose value shape did not match the chart shape.
    pub malformed_rows: usize,
    /// Rows with a non-finite timestamp.
    pub invalid_timestamps: usize,
    /// Invalid candidates dropped, indexed by series.
    pub dropped_points: Vec<usize>,
}

impl NormalizationDiagnostics {
    #[must_use]
    pub fn total_dropped(&self) -> usize {
        self.dropped_points.iter().sum()
    }
}

/// Conversion into a [`PreparedChart`] whose points are all finite.
///
/// Implemented for raw input and for already prepared charts, where it is a
/// pass-through for valid data. Applying it twice equals applying it once.
pub trait Normalize {
    fn normalize(&self) -> PreparedChart;
}

impl Normalize for RawChart {
    fn normalize(&self) -> PreparedChart {
        normalize_with_diagnostics(self).0
    }
}

impl Normalize for PreparedChart {
    fn normalize(&self) -> PreparedChart {
        let series = self
            .series
            .iter()
            .map(|series| {
                series
                    .points()
                    .iter()
                    .copied()
                    .filter(|point| point.is_finite())
                    .collect::<Vec<_>>()
                    .into()
            })
            .collect();
        PreparedChart {
            title: self.title.clone(),
            series,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartShape {
    Scalar,
    Vector(usize),
}

impl ChartShape {
    fn detect(first: Option<&RawValue>) -> Self {
        match first {
            Some(RawValue::Vector(values)) => Self::Vector(values.len()),
            _ => Self::Scalar,
        }
    }

    fn series_count(self, has_rows: bool) -> usize {
        match self {
            _ if !has_rows => 0,
            Self::Scalar => 1,
            Self::Vector(len) => len,
        }
    }
}

/// Normalizes a raw chart and reports what was dropped.
///
/// The first row fixes the chart shape. Rows of the other shape are treated
/// as malformed and contribute no point to any series.
pub fn normalize_with_diagnostics(chart: &RawChart) -> (PreparedChart, NormalizationDiagnostics) {
    let shape = ChartShape::detect(chart.data.first().map(|row| &row.value));
    let series_count = shape.series_count(!chart.data.is_empty());

    let mut series: Vec<Vec<Point>> = (0..series_count)
        .map(|_| Vec::with_capacity(chart.data.len()))
        .collect();
    let mut diagnostics = NormalizationDiagnostics {
        dropped_points: vec![0; series_count],
        ..NormalizationDiagnostics::default()
    };

    for (row_index, row) in chart.data.iter().enumerate() {
        let timestamp_valid = row.timestamp.is_finite();
        match (&row.value, shape) {
            (RawValue::Scalar(value), ChartShape::Scalar) => {
                push_candidate(&mut series, &mut diagnostics, 0, row.timestamp, Some(*value));
            }
            (RawValue::Missing, ChartShape::Scalar) => {
                diagnostics.dropped_points[0] += 1;
            }
            (RawValue::Vector(values), ChartShape::Vector(_)) => {
                for index in 0..series_count {
                    let value = values.get(index).copied().flatten();
                    push_candidate(&mut series, &mut diagnostics, index, row.timestamp, value);
                }
            }
            (value, shape) => {
                diagnostics.malformed_rows += 1;
                warn!(
                    title = %chart.title,
                    row_index,
                    ?shape,
                    value = ?value,
                    "skipping row whose value does not match chart shape"
                );
                continue;
            }
        }
        if !timestamp_valid {
            diagnostics.invalid_timestamps += 1;
        }
    }

    let series: Vec<Series> = series.into_iter().map(Series::new).collect();
    for (index, entry) in series.iter().enumerate() {
        if !entry.is_time_ordered() {
            debug!(
                title = %chart.title,
                series_index = index,
                "series timestamps are not ordered; drawing in input order"
            );
        }
    }
    debug!(
        title = %chart.title,
        rows = chart.data.len(),
        series_count,
        dropped = diagnostics.total_dropped(),
        malformed_rows = diagnostics.malformed_rows,
        "normalized chart"
    );

    (
        PreparedChart {
            title: chart.title.clone(),
            series,
        },
        diagnostics,
    )
}

fn push_candidate(
    series: &mut [Vec<Point>],
    diagnostics: &mut NormalizationDiagnostics,
    index: usize,
    timestamp: f64,
    value: Option<f64>,
) {
    match value.and_then(|value| Point::finite(timestamp, value)) {
        Some(point) => series[index].push(point),
        None => diagnostics.dropped_points[index] += 1,
    }
}

/// Normalizes every chart of a payload, preserving chart order.
#[must_use]
pub fn prepare_charts(charts: &[RawChart]) -> Vec<PreparedChart> {
    charts.iter().map(Normalize::normalize).collect()
}
