//! Open-schema validation of upstream forecast payloads.
//!
//! Only the shape the dashboard depends on is checked: a top-level block
//! named after the granularity containing a `time` array of strings. Every
//! other field, at any level, is passthrough — upstream may add variables
//! without breaking the proxy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::forecast::params::Granularity;

/// A single validation failure: where in the payload, and what was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    /// Dotted path to the offending field, e.g. `hourly.time[3]`
    pub path: String,
    pub message: String,
}

/// The upstream payload did not match the required shape.
#[derive(Debug, Error)]
#[error("upstream payload failed schema validation ({} issue(s))", .issues.len())]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

/// Typed view of a forecast block: the required `time` axis plus an untyped
/// bag of parallel series keyed by variable name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastBlock {
    /// ISO timestamps (hourly) or ISO dates (daily)
    pub time: Vec<String>,
    /// All remaining fields, one parallel array per requested variable
    #[serde(flatten)]
    pub series: Map<String, Value>,
}

impl ForecastBlock {
    /// Returns the named series as a numeric vector, or `None` when the
    /// series is absent or contains non-numeric elements.
    pub fn series_f64(&self, name: &str) -> Option<Vec<f64>> {
        self.series
            .get(name)?
            .as_array()?
            .iter()
            .map(Value::as_f64)
            .collect()
    }
}

/// Checks that `payload` carries the block required for `granularity`:
/// an object under the granularity key whose `time` field is an array of
/// strings. Unknown sibling fields are never an error.
pub fn validate(granularity: Granularity, payload: &Value) -> Result<(), SchemaError> {
    let key = granularity.as_str();
    let mut issues = Vec::new();

    match payload.get(key) {
        None | Some(Value::Null) => issues.push(SchemaIssue {
            path: key.to_string(),
            message: "required object is missing".to_string(),
        }),
        Some(Value::Object(block)) => match block.get("time") {
            None | Some(Value::Null) => issues.push(SchemaIssue {
                path: format!("{key}.time"),
                message: "required array is missing".to_string(),
            }),
            Some(Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        issues.push(SchemaIssue {
                            path: format!("{key}.time[{i}]"),
                            message: format!("expected a string, found {}", json_type(item)),
                        });
                    }
                }
            }
            Some(other) => issues.push(SchemaIssue {
                path: format!("{key}.time"),
                message: format!("expected an array, found {}", json_type(other)),
            }),
        },
        Some(other) => issues.push(SchemaIssue {
            path: key.to_string(),
            message: format!("expected an object, found {}", json_type(other)),
        }),
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SchemaError { issues })
    }
}

/// Extracts the typed view of the granularity block from a payload that has
/// already passed [`validate`].
pub fn extract_block(granularity: Granularity, payload: &Value) -> Option<ForecastBlock> {
    let block = payload.get(granularity.as_str())?.clone();
    serde_json::from_value(block).ok()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_minimal_hourly_payload() {
        let payload = json!({
            "hourly": { "time": ["2024-03-01T00:00", "2024-03-01T01:00"] }
        });
        assert!(validate(Granularity::Hourly, &payload).is_ok());
    }

    #[test]
    fn test_accepts_unknown_sibling_fields_everywhere() {
        let payload = json!({
            "latitude": -33.87,
            "longitude": 151.21,
            "generationtime_ms": 0.2,
            "hourly_units": { "temperature_2m": "°C" },
            "hourly": {
                "time": ["2024-03-01T00:00"],
                "temperature_2m": [21.4],
                "some_future_variable": [null]
            }
        });
        assert!(validate(Granularity::Hourly, &payload).is_ok());
    }

    #[test]
    fn test_accepts_minimal_daily_payload() {
        let payload = json!({
            "daily": { "time": ["2024-03-01", "2024-03-02"], "precipitation_sum": [0.0, 4.2] }
        });
        assert!(validate(Granularity::Daily, &payload).is_ok());
    }

    #[test]
    fn test_rejects_missing_block() {
        let err = validate(Granularity::Hourly, &json!({ "daily": { "time": [] } })).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].path, "hourly");
    }

    #[test]
    fn test_rejects_null_block() {
        let err = validate(Granularity::Daily, &json!({ "daily": null })).unwrap_err();
        assert_eq!(err.issues[0].path, "daily");
    }

    #[test]
    fn test_rejects_block_of_wrong_type() {
        let err = validate(Granularity::Hourly, &json!({ "hourly": [1, 2, 3] })).unwrap_err();
        assert!(err.issues[0].message.contains("expected an object"));
    }

    #[test]
    fn test_rejects_missing_time() {
        let err =
            validate(Granularity::Hourly, &json!({ "hourly": { "temperature_2m": [1.0] } }))
                .unwrap_err();
        assert_eq!(err.issues[0].path, "hourly.time");
    }

    #[test]
    fn test_rejects_non_string_time_elements() {
        let payload = json!({
            "hourly": { "time": ["2024-03-01T00:00", 42, null] }
        });
        let err = validate(Granularity::Hourly, &payload).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert_eq!(err.issues[0].path, "hourly.time[1]");
        assert_eq!(err.issues[1].path, "hourly.time[2]");
        assert!(err.issues[0].message.contains("a number"));
    }

    #[test]
    fn test_rejects_time_of_wrong_type() {
        let err =
            validate(Granularity::Daily, &json!({ "daily": { "time": "2024-03-01" } }))
                .unwrap_err();
        assert!(err.issues[0].message.contains("expected an array"));
    }

    #[test]
    fn test_empty_time_array_is_valid() {
        assert!(validate(Granularity::Hourly, &json!({ "hourly": { "time": [] } })).is_ok());
    }

    #[test]
    fn test_extract_block_preserves_series() {
        let payload = json!({
            "hourly": {
                "time": ["2024-03-01T00:00", "2024-03-01T01:00"],
                "temperature_2m": [21.4, 20.9],
                "windspeed_10m": [12.0, 14.5]
            }
        });
        let block = extract_block(Granularity::Hourly, &payload).unwrap();
        assert_eq!(block.time.len(), 2);
        assert_eq!(block.series_f64("temperature_2m"), Some(vec![21.4, 20.9]));
        assert_eq!(block.series_f64("windspeed_10m"), Some(vec![12.0, 14.5]));
        assert_eq!(block.series_f64("uv_index"), None);
    }

    #[test]
    fn test_series_f64_rejects_non_numeric_elements() {
        let payload = json!({
            "daily": { "time": ["2024-03-01"], "precipitation_sum": ["wet"] }
        });
        let block = extract_block(Granularity::Daily, &payload).unwrap();
        assert_eq!(block.series_f64("precipitation_sum"), None);
    }
}
