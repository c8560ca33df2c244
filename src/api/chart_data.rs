use tracing::debug;

use crate::core::RawChart;
use crate::error::{ChartError, ChartResult};

/// Parses the chart payload: a JSON array of `{ "title", "data" }` objects.
///
/// Only a payload that is not such an array fails; problems inside rows are
/// left for normalization to filter.
pub fn parse_charts_json(input: &str) -> ChartResult<Vec<RawChart>> {
    let charts: Vec<RawChart> = serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse charts json payload: {e}")))?;
    debug!(charts = charts.len(), "parsed charts payload");
    Ok(charts)
}

#[cfg(test)]
mod tests {
    use super::parse_charts_json;
    use crate::core::RawValue;
    use crate::error::ChartError;

    #[test]
    fn bad_rows_do_not_fail_the_payload() {
        let charts = parse_charts_json(
            r#"[{"title": "A", "data": [[0, 1], ["x", 2], [2, "oops"], [3]]}]"#,
        )
        .expect("payload");
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].data.len(), 4);
        assert!(charts[0].data[1].timestamp.is_nan());
        assert!(matches!(charts[0].data[2].value, RawValue::Malformed(_)));
        assert_eq!(charts[0].data[3].value, RawValue::Missing);
    }

    #[test]
    fn non_array_payload_is_rejected() {
        let err = parse_charts_json(r#"{"title": "A"}"#).expect_err("object payload");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
}
