//! Aviation weather integration
//!
//! Client for the aviationweather.gov data API (<https://aviationweather.gov/data/api/>).
//! Fetches METAR and TAF records for a list of stations without requiring an API key,
//! and normalizes the several response shapes the service has used into a flat list
//! of records.

pub mod client;
mod models;

pub use client::{
    AviationWeatherClient, AviationWeatherConfig, AviationWeatherError, AviationWeatherHttpClient,
};
pub use models::{MAX_ERROR_BODY_CHARS, normalize_payload, parse_records, truncate_body};
