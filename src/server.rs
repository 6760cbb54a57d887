//! HTTP API for the weather proxy.
//!
//! Exposes the validated forecast proxy to the dashboard frontend:
//! `/api/weather` (validated passthrough of the upstream payload),
//! `/api/alerts` (threshold scan over the same pipeline),
//! `/api/locations` (city presets) and `/health`.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use url::Url;

use crate::alerts::{scan_daily, scan_hourly, AlertThresholds};
use crate::forecast::{
    build_forecast_url_with_base, extract_block, fetch_with_retry, validate, FetchError,
    ForecastOptions, Granularity, RetryPolicy, SchemaError, SchemaIssue, UrlBuildError,
};
use crate::locations::all_cities;
use crate::region::is_valid_region;

/// Freshness hint attached to successful forecast responses.
const CACHE_CONTROL_VALUE: &str = "public, max-age=300";

/// Shared state for HTTP handlers.
///
/// Holds only request-independent plumbing; every request is otherwise
/// self-contained, so one state instance safely serves any number of
/// concurrent requests.
#[derive(Clone)]
pub struct AppState {
    http: Client,
    upstream_base: Url,
    retry: RetryPolicy,
}

impl AppState {
    /// Creates state with a 10-second request timeout and the default
    /// retry policy.
    pub fn new(upstream_base: Url) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            http,
            upstream_base,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy (integration tests use short backoff).
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Inbound query parameters for `/api/weather` and `/api/alerts`.
///
/// All fields are accepted as raw strings so parse failures map to the API's
/// own error bodies rather than the framework's rejection.
#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub gran: Option<String>,
    pub vars: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// A fully parsed, validated-at-the-edge request.
#[derive(Debug)]
pub struct ParsedRequest {
    pub lat: f64,
    pub lon: f64,
    pub granularity: Granularity,
    pub options: ForecastOptions,
}

/// Failures a request can end in, mapped to the API's status+body contract.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required parameters: lat and lon")]
    MissingParameter,

    #[error("Invalid coordinates: lat and lon must be numbers")]
    InvalidCoordinate,

    #[error("Coordinates must be within Australia or New Zealand bounds")]
    OutOfRegion,

    /// Transport-level failure after retries were exhausted
    #[error("Failed to fetch weather data")]
    UpstreamUnavailable { message: String },

    /// Upstream kept returning a non-ok status
    #[error("Upstream error")]
    UpstreamStatus { status: StatusCode },

    /// The upstream contract was violated; retrying cannot fix structure
    #[error("Invalid schema")]
    SchemaMismatch { issues: Vec<SchemaIssue> },
}

impl From<UrlBuildError> for ApiError {
    fn from(err: UrlBuildError) -> Self {
        match err {
            UrlBuildError::RegionOutOfBounds { .. } => ApiError::OutOfRegion,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport { source, .. } => ApiError::UpstreamUnavailable {
                message: source.to_string(),
            },
            FetchError::Status { status, .. } => ApiError::UpstreamStatus { status },
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        ApiError::SchemaMismatch { issues: err.issues }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter | ApiError::InvalidCoordinate | ApiError::OutOfRegion => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UpstreamUnavailable { .. } | ApiError::UpstreamStatus { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::SchemaMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::UpstreamStatus { status: upstream } => {
                log::warn!("upstream kept failing with {upstream}");
            }
            ApiError::UpstreamUnavailable { message } => {
                log::warn!("upstream unreachable: {message}");
            }
            ApiError::SchemaMismatch { issues } => {
                log::warn!("upstream payload failed validation ({} issue(s))", issues.len());
            }
            _ => {}
        }
        let body = match &self {
            ApiError::UpstreamUnavailable { message } => json!({
                "error": "Failed to fetch weather data",
                "message": message,
            }),
            ApiError::SchemaMismatch { issues } => json!({
                "error": "Invalid schema",
                "details": issues,
            }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

/// Parses the inbound query into a [`ParsedRequest`].
///
/// Fails fast: no network call is made for a malformed request.
pub fn parse_request(query: &WeatherQuery) -> Result<ParsedRequest, ApiError> {
    let (Some(lat_raw), Some(lon_raw)) = (query.lat.as_deref(), query.lon.as_deref()) else {
        return Err(ApiError::MissingParameter);
    };

    let lat: f64 = lat_raw
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidCoordinate)?;
    let lon: f64 = lon_raw
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidCoordinate)?;
    // "nan" and "inf" parse successfully but are not usable coordinates
    if !lat.is_finite() || !lon.is_finite() {
        return Err(ApiError::InvalidCoordinate);
    }

    let granularity = Granularity::from_param(query.gran.as_deref());
    let variables = query.vars.as_deref().map(|raw| {
        if raw.is_empty() {
            Vec::new()
        } else {
            raw.split(',').map(|v| v.trim().to_string()).collect()
        }
    });

    Ok(ParsedRequest {
        lat,
        lon,
        granularity,
        options: ForecastOptions {
            variables,
            start_date: query.start.clone(),
            end_date: query.end.clone(),
            timezone: None,
        },
    })
}

/// Runs the shared pipeline: region check, URL construction, retrying fetch,
/// schema validation. Returns the validated payload verbatim.
async fn fetch_validated(state: &AppState, request: &ParsedRequest) -> Result<Value, ApiError> {
    if !is_valid_region(request.lat, request.lon) {
        return Err(ApiError::OutOfRegion);
    }

    let url = build_forecast_url_with_base(
        &state.upstream_base,
        request.lat,
        request.lon,
        request.granularity,
        &request.options,
    )?;

    let body = fetch_with_retry(&state.http, url, &state.retry).await?;
    let payload: Value = serde_json::from_str(&body).map_err(|e| ApiError::SchemaMismatch {
        issues: vec![SchemaIssue {
            path: "$".to_string(),
            message: format!("body is not valid JSON: {e}"),
        }],
    })?;

    validate(request.granularity, &payload)?;
    Ok(payload)
}

/// GET /api/weather - validated passthrough of the upstream forecast
async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, ApiError> {
    let request = parse_request(&query)?;
    let payload = fetch_validated(&state, &request).await?;

    Ok((
        [(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)],
        Json(payload),
    )
        .into_response())
}

/// GET /api/alerts - threshold scan over the fetched forecast
async fn get_alerts(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, ApiError> {
    let request = parse_request(&query)?;
    let payload = fetch_validated(&state, &request).await?;

    let block =
        extract_block(request.granularity, &payload).ok_or_else(|| ApiError::SchemaMismatch {
            issues: vec![SchemaIssue {
                path: request.granularity.as_str().to_string(),
                message: "block does not match the expected shape".to_string(),
            }],
        })?;

    let thresholds = AlertThresholds::default();
    let alerts = match request.granularity {
        Granularity::Hourly => scan_hourly(&block, &thresholds),
        Granularity::Daily => scan_daily(&block, &thresholds),
    };

    Ok(Json(json!({ "alerts": alerts })).into_response())
}

/// GET /api/locations - the static city presets
async fn list_locations() -> Json<&'static [crate::locations::City]> {
    Json(all_cities())
}

/// GET /health - health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Create the HTTP router.
pub fn create_router(state: AppState) -> Router {
    // CORS layer so the dashboard frontend can call from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/weather", get(get_weather))
        .route("/api/alerts", get(get_alerts))
        .route("/api/locations", get(list_locations))
        .layer(cors)
        .with_state(state)
}
