//! Departures provider HTTP client.
//!
//! Issues one bounded-time GET per board request, with the origin station
//! code as the sole required query parameter. Failures are reported to the
//! caller after a single attempt; re-submission is the caller's decision.

use tracing::debug;

use crate::domain::Crs;

use super::error::BoardError;
use super::types::{BoardResponse, RawDeparture};

/// Hard deadline for one board request, in seconds. On expiry the
/// in-flight request is dropped and the fetch fails with `Timeout`.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// How much of an unparseable body to keep for diagnostics.
const BODY_PREFIX_CHARS: usize = 500;

/// Configuration for the departures client.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Base URL of the departures endpoint.
    pub base_url: String,
    /// Optional API key, passed through as a query parameter.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl BoardConfig {
    /// Create a new config for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set an API key to send with each request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Departures provider client.
///
/// Fetches the raw departure board for one origin station at a time.
#[derive(Debug, Clone)]
pub struct BoardClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BoardClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch the raw departure board for one origin station.
    ///
    /// Returns records in upstream order. A response without the
    /// `departures.all` path is an empty board, not an error. No retries:
    /// a single failed attempt is reported to the caller.
    pub async fn fetch_board(&self, station: &Crs) -> Result<Vec<RawDeparture>, BoardError> {
        let mut request = self
            .http
            .get(&self.base_url)
            .query(&[("station", station.as_str())]);

        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BoardError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let board: BoardResponse =
            serde_json::from_str(&body).map_err(|e| BoardError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(BODY_PREFIX_CHARS).collect()),
            })?;

        let departures = board.into_departures();
        debug!(station = %station, count = departures.len(), "fetched departure board");

        Ok(departures)
    }
}

impl super::DepartureSource for BoardClient {
    async fn fetch_board(&self, station: &Crs) -> Result<Vec<RawDeparture>, BoardError> {
        BoardClient::fetch_board(self, station).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = BoardConfig::new("http://localhost:8080/departures")
            .with_api_key("test-key")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080/departures");
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = BoardConfig::new("http://localhost:8080/departures");

        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let config = BoardConfig::new("http://localhost:8080/departures");
        let client = BoardClient::new(config);
        assert!(client.is_ok());
    }

    // Integration tests would go here, but require a live endpoint and
    // would make actual HTTP requests. They should be marked with
    // #[ignore] and run separately.
}
