//! Request parameters for forecast lookups.
//!
//! Defines the hourly/daily granularity selector, the per-granularity
//! default variable sets, and the optional overrides a request may carry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum span, in days, allowed between `start_date` and `end_date`.
///
/// The proxy itself does not enforce this; the dashboard validates the
/// window before issuing a request (see [`validate_date_range`]).
pub const MAX_RANGE_DAYS: i64 = 30;

/// Selects whether forecast data is reported per hour or per day, and which
/// upstream response shape applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    Daily,
}

impl Granularity {
    /// Wire name of the granularity, used both as the upstream query
    /// parameter and as the key of the response block.
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
        }
    }

    /// Interprets the optional `gran` query parameter.
    ///
    /// Only `daily` (case-insensitive) selects daily granularity; anything
    /// else, including absence, falls back to hourly.
    pub fn from_param(param: Option<&str>) -> Granularity {
        match param {
            Some(s) if s.eq_ignore_ascii_case("daily") => Granularity::Daily,
            _ => Granularity::Hourly,
        }
    }

    /// Default upstream variables requested at this granularity.
    pub fn default_variables(&self) -> &'static [&'static str] {
        match self {
            Granularity::Hourly => &["temperature_2m", "precipitation", "windspeed_10m"],
            Granularity::Daily => &[
                "temperature_2m_max",
                "temperature_2m_min",
                "precipitation_sum",
                "windspeed_10m_max",
            ],
        }
    }
}

/// Optional overrides for an upstream forecast request.
#[derive(Debug, Clone, Default)]
pub struct ForecastOptions {
    /// Requested variable names; `None` selects the granularity default.
    /// An explicit empty list is honored as-is.
    pub variables: Option<Vec<String>>,
    /// Inclusive range start, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Inclusive range end, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// IANA timezone name; defaults to `auto` (upstream resolves from the
    /// coordinates)
    pub timezone: Option<String>,
}

impl ForecastOptions {
    /// Timezone to send upstream.
    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or("auto")
    }
}

/// Errors from [`validate_date_range`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    /// A date string did not parse as an ISO calendar date
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The start date is after the end date
    #[error("start date {start} is after end date {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },

    /// The window exceeds [`MAX_RANGE_DAYS`]
    #[error("date range spans {days} days, maximum is {MAX_RANGE_DAYS}")]
    TooWide { days: i64 },
}

/// Checks that a start/end date pair is well-formed: both parse as ISO
/// calendar dates, start is not after end, and the span does not exceed
/// [`MAX_RANGE_DAYS`].
///
/// Intended for the dashboard caller; the proxy forwards date parameters
/// without enforcing this invariant.
pub fn validate_date_range(start: &str, end: &str) -> Result<(), DateRangeError> {
    let start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .map_err(|_| DateRangeError::InvalidDate(start.to_string()))?;
    let end_date = NaiveDate::parse_from_str(end, "%Y-%m-%d")
        .map_err(|_| DateRangeError::InvalidDate(end.to_string()))?;

    if start_date > end_date {
        return Err(DateRangeError::Reversed {
            start: start_date,
            end: end_date,
        });
    }

    let days = (end_date - start_date).num_days();
    if days > MAX_RANGE_DAYS {
        return Err(DateRangeError::TooWide { days });
    }

    Ok(())
}
