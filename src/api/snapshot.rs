use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomTransform;
use crate::render::Renderer;

use super::{ChartView, FallbackReason, RenderOutcome};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub title: Option<String>,
    pub viewport: Viewport,
    pub transform: ZoomTransform,
    /// Visible x domain after zoom.
    pub x_domain: Option<(f64, f64)>,
    pub base_x_domain: Option<(f64, f64)>,
    pub y_domain: Option<(f64, f64)>,
    pub series_lengths: Vec<usize>,
    pub fallback: Option<FallbackReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> ChartView<R> {
    pub fn snapshot(&self) -> ChartResult<ChartSnapshot> {
        let fallback = match self.last_outcome() {
            Some(RenderOutcome::Fallback(reason)) => Some(reason),
            Some(RenderOutcome::Chart { .. }) => None,
            None if self.chart().is_none() => Some(FallbackReason::NoChart),
            None => self.scales().is_none().then_some(FallbackReason::NoValidPoints),
        };

        Ok(ChartSnapshot {
            title: self.chart().map(|chart| chart.title.clone()),
            viewport: self.viewport(),
            transform: self.transform(),
            x_domain: self.x_scale()?.map(|scale| scale.domain()),
            base_x_domain: self.scales().map(|scales| scales.x.domain()),
            y_domain: self.y_scale().map(|scale| scale.domain()),
            series_lengths: self
                .chart()
                .map(|chart| chart.series.iter().map(|series| series.len()).collect())
                .unwrap_or_default(),
            fallback,
        })
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot()?.to_json_contract_v1_pretty()
    }
}
