//! Ozmeteo - weather proxy API for an Australia/New Zealand dashboard
//!
//! Validates coordinates against the AU/NZ service area, builds Open-Meteo
//! forecast URLs, fetches with bounded retry, and checks the response shape
//! before passing it through to the dashboard.

pub mod alerts;
pub mod cli;
pub mod forecast;
pub mod locations;
pub mod region;
pub mod server;
