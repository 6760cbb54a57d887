//! Forecast proxy core: request parameters, upstream URL construction,
//! retrying fetch, and open-schema validation of the upstream response.

pub mod fetch;
pub mod params;
pub mod schema;
pub mod url;

pub use self::fetch::{fetch_with_retry, FetchError, RetryPolicy};
pub use self::params::{validate_date_range, ForecastOptions, Granularity, MAX_RANGE_DAYS};
pub use self::schema::{extract_block, validate, ForecastBlock, SchemaError, SchemaIssue};
pub use self::url::{
    build_forecast_url, build_forecast_url_with_base, UrlBuildError, OPEN_METEO_BASE_URL,
};
