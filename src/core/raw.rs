use serde::de::Deserializer;
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value cell of one raw data row.
///
/// The scalar/vector distinction is explicit so a zero- or one-element vector
/// is never confused with a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Scalar(f64),
    /// One entry per series; `None` marks a null or non-numeric element.
    Vector(Vec<Option<f64>>),
    /// JSON `null` or an absent value element.
    Missing,
    /// Any other JSON shape, described for diagnostics.
    Malformed(String),
}

impl RawValue {
    #[must_use]
    pub fn vector(values: impl IntoIterator<Item = f64>) -> Self {
        Self::Vector(values.into_iter().map(Some).collect())
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(number) => number.as_f64().map_or_else(
                || Self::Malformed(format!("unrepresentable number `{number}`")),
                Self::Scalar,
            ),
            Value::Array(items) => Self::Vector(items.iter().map(Value::as_f64).collect()),
            Value::Bool(flag) => Self::Malformed(format!("boolean `{flag}`")),
            Value::String(text) => Self::Malformed(format!("string `{text}`")),
            Value::Object(_) => Self::Malformed("object".to_owned()),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Scalar(value) => json_number(*value),
            Self::Vector(values) => Value::Array(
                values
                    .iter()
                    .map(|value| value.map_or(Value::Null, json_number))
                    .collect(),
            ),
            Self::Missing => Value::Null,
            Self::Malformed(description) => Value::String(description.clone()),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Option<f64>>> for RawValue {
    fn from(values: Vec<Option<f64>>) -> Self {
        Self::Vector(values)
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// One `[timestamp, value]` row as delivered by the data collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    pub timestamp: f64,
    pub value: RawValue,
}

impl RawPoint {
    #[must_use]
    pub fn new(timestamp: f64, value: impl Into<RawValue>) -> Self {
        Self {
            timestamp,
            value: value.into(),
        }
    }
}

impl<'de> Deserialize<'de> for RawPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Rows are tolerated in any shape; non-numeric timestamps become NaN and
        // are dropped during normalization.
        let row = Value::deserialize(deserializer)?;
        let (timestamp, value) = match row {
            Value::Array(mut cells) => {
                let value = if cells.len() > 1 {
                    RawValue::from_json(cells.swap_remove(1))
                } else {
                    RawValue::Missing
                };
                let timestamp = cells.first().and_then(Value::as_f64).unwrap_or(f64::NAN);
                (timestamp, value)
            }
            other => (
                f64::NAN,
                RawValue::Malformed(format!("row is not an array: {other}")),
            ),
        };
        Ok(Self { timestamp, value })
    }
}

impl Serialize for RawPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&json_number(self.timestamp))?;
        tuple.serialize_element(&self.value)?;
        tuple.end()
    }
}

/// A chart exactly as received, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChart {
    pub title: String,
    #[serde(default)]
    pub data: Vec<RawPoint>,
}

impl RawChart {
    #[must_use]
    pub fn new(title: impl Into<String>, data: Vec<RawPoint>) -> Self {
        Self {
            title: title.into(),
            data,
        }
    }
}

fn json_number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}
