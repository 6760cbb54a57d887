//! Upstream forecast URL construction.
//!
//! Builds the Open-Meteo request URL from validated coordinates, a
//! granularity and optional overrides. Construction is pure and refuses
//! coordinates outside the service area, so no out-of-region request can
//! ever reach the network.

use std::sync::LazyLock;

use thiserror::Error;
use url::Url;

use crate::forecast::params::{ForecastOptions, Granularity};
use crate::region::is_valid_region;

/// Base URL for the Open-Meteo forecast API
pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

static BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(OPEN_METEO_BASE_URL).expect("base URL constant parses"));

/// Errors that can occur when building a forecast URL
#[derive(Debug, Error, PartialEq)]
pub enum UrlBuildError {
    /// The coordinates fall outside both service-area bounding boxes
    #[error("coordinates ({lat}, {lon}) are outside the Australia or New Zealand bounds")]
    RegionOutOfBounds { lat: f64, lon: f64 },
}

/// Builds the upstream forecast URL against the fixed Open-Meteo base.
pub fn build_forecast_url(
    lat: f64,
    lon: f64,
    granularity: Granularity,
    options: &ForecastOptions,
) -> Result<Url, UrlBuildError> {
    build_forecast_url_with_base(&BASE, lat, lon, granularity, options)
}

/// Builds the upstream forecast URL against an explicit base.
///
/// Open-Meteo can be self-hosted, and the integration tests point the proxy
/// at a local stub; everything else goes through [`build_forecast_url`].
///
/// Query parameters are appended in a fixed order so identical inputs always
/// produce an identical URL: `latitude`, `longitude`, `timezone`, the
/// granularity parameter, then `start_date`/`end_date` only when present.
/// An empty variable list yields an empty-valued granularity parameter.
pub fn build_forecast_url_with_base(
    base: &Url,
    lat: f64,
    lon: f64,
    granularity: Granularity,
    options: &ForecastOptions,
) -> Result<Url, UrlBuildError> {
    if !is_valid_region(lat, lon) {
        return Err(UrlBuildError::RegionOutOfBounds { lat, lon });
    }

    let variables = match &options.variables {
        Some(vars) => vars.join(","),
        None => granularity.default_variables().join(","),
    };

    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("latitude", &lat.to_string())
        .append_pair("longitude", &lon.to_string())
        .append_pair("timezone", options.timezone())
        .append_pair(granularity.as_str(), &variables);
    if let Some(start) = &options.start_date {
        url.query_pairs_mut().append_pair("start_date", start);
    }
    if let Some(end) = &options.end_date {
        url.query_pairs_mut().append_pair("end_date", end);
    }

    Ok(url)
}
