//! Core data model for City Weather
//!
//! This module contains the normalized weather record returned by a lookup and
//! the HTTP client that fetches it.

pub mod weather;

pub use weather::{WeatherClient, WeatherError, DEFAULT_BASE_URL};

use serde::{Deserialize, Serialize};

/// Country shown on the card when the provider omits one
pub const FALLBACK_COUNTRY: &str = "FRANCE";

/// Current weather for a single city, as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Provider-assigned identifier
    pub id: i64,
    /// Canonical city name
    pub city: String,
    /// Country name, if the provider sent one
    #[serde(default)]
    pub country: Option<String>,
    /// Current temperature in Celsius
    pub temperature: f64,
    /// Primary free-text condition
    #[serde(default)]
    pub description: Option<String>,
    /// Secondary free-text condition; wins over `description` when both are set
    #[serde(default, rename = "weather_description")]
    pub alternate_description: Option<String>,
    /// Relative humidity percentage
    #[serde(default)]
    pub humidity: f64,
    /// Wind speed as reported by the provider
    #[serde(default, rename = "windSpeed", alias = "wind_speed")]
    pub wind_speed: f64,
    /// Provider timestamp, kept verbatim
    #[serde(default)]
    pub date: String,
}

impl WeatherRecord {
    /// The description used for display and classification.
    ///
    /// An empty string counts as absent, so an empty alternate description
    /// falls back to the primary one.
    pub fn effective_description(&self) -> Option<&str> {
        self.alternate_description
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.description.as_deref().filter(|s| !s.is_empty()))
    }

    /// Uppercased country, or [`FALLBACK_COUNTRY`] when missing
    pub fn display_country(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => country.to_uppercase(),
            _ => FALLBACK_COUNTRY.to_string(),
        }
    }

    /// Temperature rounded to a whole degree, halves rounding up (-2.5 -> -2)
    pub fn display_temperature(&self) -> i64 {
        (self.temperature + 0.5).floor() as i64
    }
}
