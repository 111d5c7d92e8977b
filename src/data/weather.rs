//! Weather provider API client
//!
//! This module fetches current weather for a city from the provider's
//! `/api/v1/weathers` search endpoint and parses it into a [`WeatherRecord`].

use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, warn};

use super::WeatherRecord;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://freetestapi.com";

/// Path of the search endpoint, relative to the base URL
const WEATHERS_PATH: &str = "api/v1/weathers";

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The configured base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The provider returned an empty result list
    #[error("No weather data found")]
    NoResults,
}

/// Client for the weather search endpoint
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    endpoint: Url,
}

impl WeatherClient {
    /// Create a new WeatherClient against the given base URL
    ///
    /// # Arguments
    /// * `base_url` - Scheme and host of the provider, e.g. `https://freetestapi.com`
    ///
    /// # Returns
    /// * `Err(WeatherError::InvalidBaseUrl)` if the URL cannot be parsed
    pub fn new(base_url: &str) -> Result<Self, WeatherError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, WeatherError> {
        Ok(Self {
            client,
            endpoint: endpoint_url(base_url)?,
        })
    }

    /// The fully resolved search endpoint
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetch current weather for a city
    ///
    /// The provider answers with a list of matches; only the first is kept.
    ///
    /// # Arguments
    /// * `city` - City name, sent URL-encoded as the `search` parameter
    ///
    /// # Returns
    /// * `Ok(WeatherRecord)` - Weather for the first matching city
    /// * `Err(WeatherError)` - If the request, status, parsing, or result list fails
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError> {
        debug!(city, endpoint = %self.endpoint, "fetching weather");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("search", city)])
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;

        let record = parse_response(&text).inspect_err(|err| {
            warn!(city, error = %err, "weather response rejected");
        })?;
        debug!(city, record_id = record.id, "weather fetched");
        Ok(record)
    }
}

/// Parse a provider response body, keeping the first record
pub fn parse_response(text: &str) -> Result<WeatherRecord, WeatherError> {
    let records: Vec<WeatherRecord> = serde_json::from_str(text)?;
    records.into_iter().next().ok_or(WeatherError::NoResults)
}

/// Build the search endpoint from a base URL, tolerating trailing slashes
fn endpoint_url(base_url: &str) -> Result<Url, WeatherError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{}/{}", trimmed, WEATHERS_PATH))
        .map_err(|_| WeatherError::InvalidBaseUrl(base_url.to_string()))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(WeatherError::InvalidBaseUrl(base_url.to_string()));
    }

    Ok(url)
}
