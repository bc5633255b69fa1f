//! Where the monthly series comes from.
//!
//! Two implementations of `SeriesSource`:
//! - `RemoteSource`: one blocking GET against the ABS data API
//! - `ManualSource`: the literal known-good series
//!
//! `load_with_fallback` tries the remote source and substitutes the manual
//! series on any `SourceError`. The caller always gets a usable series.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::{info, warn};

use crate::data::manual::manual_series;
use crate::data::sdmx;
use crate::domain::{SeriesRecord, SourceTag};
use crate::error::AppError;

/// Monthly Household Spending Indicator: food, seasonally adjusted, Australia.
pub const DEFAULT_API_URL: &str = "https://data.api.abs.gov.au/rest/data/ABS,HSI_M,1.6.0/7+8+9.2.10.AUS.M";
pub const DEFAULT_START_PERIOD: &str = "2024-01";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const SDMX_JSON: &str = "application/vnd.sdmx.data+json;version=2.0.0";

/// Recoverable failures reaching or reading the remote series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Network error, timeout, or non-success HTTP status.
    Transport(String),
    /// The body is not the expected SDMX-JSON shape.
    MalformedPayload(String),
    /// Structurally valid, but no observations.
    EmptyResult,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Transport(msg) => write!(f, "transport failure: {msg}"),
            SourceError::MalformedPayload(msg) => write!(f, "malformed payload: {msg}"),
            SourceError::EmptyResult => write!(f, "payload contains no observations"),
        }
    }
}

impl std::error::Error for SourceError {}

pub trait SeriesSource {
    fn tag(&self) -> SourceTag;

    fn fetch(&self) -> Result<SeriesRecord, SourceError>;
}

/// Remote endpoint settings (env-overridable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub api_url: String,
    pub start_period: String,
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            start_period: DEFAULT_START_PERIOD.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SourceConfig {
    /// Read `FOODSPEND_API_URL`, `FOODSPEND_START_PERIOD` and
    /// `FOODSPEND_TIMEOUT_SECS` (after loading `.env` if present).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(url) = lookup("FOODSPEND_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(start) = lookup("FOODSPEND_START_PERIOD").filter(|v| !v.trim().is_empty()) {
            let start = start.trim();
            start
                .parse::<crate::domain::Period>()
                .map_err(|e| AppError::config(format!("FOODSPEND_START_PERIOD: {e}")))?;
            config.start_period = start.to_string();
        }
        if let Some(raw) = lookup("FOODSPEND_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::config(format!("FOODSPEND_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'.")))?;
            if secs == 0 {
                return Err(AppError::config("FOODSPEND_TIMEOUT_SECS must be > 0."));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

pub struct RemoteSource {
    client: Client,
    config: SourceConfig,
}

impl RemoteSource {
    pub fn new(config: SourceConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

impl SeriesSource for RemoteSource {
    fn tag(&self) -> SourceTag {
        SourceTag::Api
    }

    fn fetch(&self) -> Result<SeriesRecord, SourceError> {
        // gzip is negotiated by the client; setting Accept-Encoding by hand
        // would disable transparent decompression.
        let resp = self
            .client
            .get(&self.config.api_url)
            .header(ACCEPT, SDMX_JSON)
            .query(&[
                ("startPeriod", self.config.start_period.as_str()),
                ("dimensionAtObservation", "AllDimensions"),
            ])
            .send()
            .map_err(|e| SourceError::Transport(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(SourceError::Transport(format!("HTTP status {}", resp.status())));
        }

        let body = resp
            .text()
            .map_err(|e| SourceError::Transport(format!("failed to read body: {e}")))?;

        sdmx::normalize(&body)
    }
}

pub struct ManualSource;

impl ManualSource {
    pub fn series(&self) -> SeriesRecord {
        manual_series()
    }
}

impl SeriesSource for ManualSource {
    fn tag(&self) -> SourceTag {
        SourceTag::Manual
    }

    fn fetch(&self) -> Result<SeriesRecord, SourceError> {
        Ok(self.series())
    }
}

/// Try `primary`; on any failure use the manual series.
pub fn load_with_fallback(primary: &dyn SeriesSource, fallback: &ManualSource) -> SeriesRecord {
    match primary.fetch() {
        Ok(series) => {
            info!(source = %primary.tag(), points = series.len(), "loaded series");
            series
        }
        Err(err) => {
            warn!(source = %primary.tag(), error = %err, "falling back to manual series");
            fallback.series()
        }
    }
}
