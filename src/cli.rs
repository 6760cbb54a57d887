//! Command-line interface parsing for the weather proxy.
//!
//! Parses the bind address, port and optional upstream override, and turns
//! them into a validated server configuration.

use clap::Parser;
use thiserror::Error;
use url::Url;

use crate::forecast::OPEN_METEO_BASE_URL;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The upstream override did not parse as an absolute URL
    #[error("Invalid upstream URL '{raw}': {source}")]
    InvalidUpstreamUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
}

/// Ozmeteo - weather proxy API for the AU/NZ dashboard
#[derive(Parser, Debug)]
#[command(name = "ozmeteo")]
#[command(about = "Weather proxy API for an Australia/New Zealand city dashboard")]
#[command(version)]
pub struct Cli {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Override the upstream forecast base URL (e.g. a self-hosted
    /// Open-Meteo instance)
    #[arg(long, value_name = "URL")]
    pub upstream_url: Option<String>,
}

/// Validated configuration derived from CLI arguments.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub upstream: Url,
}

impl ServerConfig {
    /// Creates a ServerConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(ServerConfig)` with the upstream resolved to either the
    ///   override or the fixed Open-Meteo base
    /// * `Err(CliError)` if the override is not a valid absolute URL
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let raw = cli.upstream_url.as_deref().unwrap_or(OPEN_METEO_BASE_URL);
        let upstream = Url::parse(raw).map_err(|source| CliError::InvalidUpstreamUrl {
            raw: raw.to_string(),
            source,
        })?;

        Ok(ServerConfig {
            bind: cli.bind.clone(),
            port: cli.port,
            upstream,
        })
    }
}
