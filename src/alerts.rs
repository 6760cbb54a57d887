//! Weather alert thresholds for the dashboard.
//!
//! Scans a validated forecast block for values crossing fixed severity
//! thresholds and produces the human-readable messages the dashboard
//! displays as banners.

use serde::Serialize;

use crate::forecast::ForecastBlock;

/// Threshold values at or above which an alert fires.
#[derive(Debug, Clone)]
pub struct AlertThresholds {
    /// Wind speed in km/h
    pub wind_kmh: f64,
    /// Precipitation in mm (per hour, or per day for daily sums)
    pub precipitation_mm: f64,
    /// Air temperature in °C
    pub heat_c: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            wind_kmh: 60.0,
            precipitation_mm: 10.0,
            heat_c: 35.0,
        }
    }
}

/// Category of a fired alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    StrongWind,
    HeavyRain,
    ExtremeHeat,
}

impl AlertKind {
    /// Display label used in alert messages.
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::StrongWind => "Strong wind",
            AlertKind::HeavyRain => "Heavy rain",
            AlertKind::ExtremeHeat => "Extreme heat",
        }
    }
}

/// A single alert produced by a threshold scan.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    /// Timestamp (hourly) or date (daily) from the forecast `time` axis
    pub time: String,
    pub message: String,
}

/// Scans an hourly forecast block for threshold crossings.
///
/// Reads the `windspeed_10m`, `precipitation` and `temperature_2m` series;
/// a missing or non-numeric series is skipped rather than treated as an
/// error, since callers may have requested a narrower variable set.
pub fn scan_hourly(block: &ForecastBlock, thresholds: &AlertThresholds) -> Vec<WeatherAlert> {
    let mut alerts = Vec::new();
    scan_series(
        block,
        "windspeed_10m",
        thresholds.wind_kmh,
        AlertKind::StrongWind,
        "km/h",
        &mut alerts,
    );
    scan_series(
        block,
        "precipitation",
        thresholds.precipitation_mm,
        AlertKind::HeavyRain,
        "mm",
        &mut alerts,
    );
    scan_series(
        block,
        "temperature_2m",
        thresholds.heat_c,
        AlertKind::ExtremeHeat,
        "°C",
        &mut alerts,
    );
    alerts
}

/// Scans a daily forecast block for threshold crossings, using the daily
/// aggregate variable names.
pub fn scan_daily(block: &ForecastBlock, thresholds: &AlertThresholds) -> Vec<WeatherAlert> {
    let mut alerts = Vec::new();
    scan_series(
        block,
        "windspeed_10m_max",
        thresholds.wind_kmh,
        AlertKind::StrongWind,
        "km/h",
        &mut alerts,
    );
    scan_series(
        block,
        "precipitation_sum",
        thresholds.precipitation_mm,
        AlertKind::HeavyRain,
        "mm",
        &mut alerts,
    );
    scan_series(
        block,
        "temperature_2m_max",
        thresholds.heat_c,
        AlertKind::ExtremeHeat,
        "°C",
        &mut alerts,
    );
    alerts
}

fn scan_series(
    block: &ForecastBlock,
    series_name: &str,
    threshold: f64,
    kind: AlertKind,
    unit: &str,
    alerts: &mut Vec<WeatherAlert>,
) {
    let Some(values) = block.series_f64(series_name) else {
        return;
    };

    for (time, value) in block.time.iter().zip(values) {
        if value >= threshold {
            alerts.push(WeatherAlert {
                kind,
                time: time.clone(),
                message: format!("{}: {:.1} {} at {}", kind.label(), value, unit, time),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{extract_block, Granularity};
    use serde_json::json;

    fn hourly_block(payload: serde_json::Value) -> ForecastBlock {
        extract_block(Granularity::Hourly, &payload).unwrap()
    }

    #[test]
    fn test_no_alerts_below_thresholds() {
        let block = hourly_block(json!({
            "hourly": {
                "time": ["2024-03-01T00:00", "2024-03-01T01:00"],
                "temperature_2m": [24.0, 26.5],
                "precipitation": [0.0, 1.2],
                "windspeed_10m": [18.0, 32.0]
            }
        }));
        assert!(scan_hourly(&block, &AlertThresholds::default()).is_empty());
    }

    #[test]
    fn test_wind_alert_fires_at_threshold() {
        let block = hourly_block(json!({
            "hourly": {
                "time": ["2024-03-01T00:00", "2024-03-01T01:00"],
                "windspeed_10m": [59.9, 60.0]
            }
        }));
        let alerts = scan_hourly(&block, &AlertThresholds::default());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::StrongWind);
        assert_eq!(alerts[0].time, "2024-03-01T01:00");
        assert!(alerts[0].message.contains("60.0 km/h"));
    }

    #[test]
    fn test_multiple_kinds_can_fire_together() {
        let block = hourly_block(json!({
            "hourly": {
                "time": ["2024-03-01T14:00"],
                "temperature_2m": [41.2],
                "precipitation": [0.0],
                "windspeed_10m": [75.0]
            }
        }));
        let alerts = scan_hourly(&block, &AlertThresholds::default());
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().any(|a| a.kind == AlertKind::StrongWind));
        assert!(alerts.iter().any(|a| a.kind == AlertKind::ExtremeHeat));
    }

    #[test]
    fn test_missing_series_is_skipped() {
        let block = hourly_block(json!({
            "hourly": { "time": ["2024-03-01T00:00"], "uv_index": [11.0] }
        }));
        assert!(scan_hourly(&block, &AlertThresholds::default()).is_empty());
    }

    #[test]
    fn test_daily_scan_uses_aggregate_names() {
        let block = extract_block(
            Granularity::Daily,
            &json!({
                "daily": {
                    "time": ["2024-03-01", "2024-03-02"],
                    "temperature_2m_max": [36.5, 29.0],
                    "precipitation_sum": [0.2, 24.0],
                    "windspeed_10m_max": [40.0, 55.0]
                }
            }),
        )
        .unwrap();

        let alerts = scan_daily(&block, &AlertThresholds::default());
        assert_eq!(alerts.len(), 2);
        assert!(alerts
            .iter()
            .any(|a| a.kind == AlertKind::ExtremeHeat && a.time == "2024-03-01"));
        assert!(alerts
            .iter()
            .any(|a| a.kind == AlertKind::HeavyRain && a.time == "2024-03-02"));
    }

    #[test]
    fn test_custom_thresholds() {
        let block = hourly_block(json!({
            "hourly": { "time": ["2024-03-01T00:00"], "windspeed_10m": [45.0] }
        }));
        let thresholds = AlertThresholds {
            wind_kmh: 40.0,
            ..Default::default()
        };
        assert_eq!(scan_hourly(&block, &thresholds).len(), 1);
    }
}
