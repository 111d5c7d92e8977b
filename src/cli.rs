//! Command-line interface parsing for City Weather
//!
//! This module handles parsing of CLI arguments using clap. The provider base
//! URL can also come from the `WEATHER_API_BASE_URL` environment variable,
//! which `main` may load from a `.env` file.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::{WeatherClient, DEFAULT_BASE_URL};
use crate::ui::Theme;

/// City looked up on startup when none is given
pub const DEFAULT_CITY: &str = "Paris";

/// Default pause between a search submission and its request
pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 100;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The startup city is empty or whitespace
    #[error("City must not be empty")]
    EmptyCity,

    /// The provider base URL is not a usable http(s) URL
    #[error("Invalid API base URL: '{0}'")]
    InvalidBaseUrl(String),
}

/// City Weather - current weather and clothing advice for any city
#[derive(Parser, Debug)]
#[command(name = "cityweather")]
#[command(about = "Look up the current weather for a city")]
#[command(version)]
pub struct Cli {
    /// City looked up when the widget starts
    #[arg(long, value_name = "CITY", default_value = DEFAULT_CITY)]
    pub city: String,

    /// Base URL of the weather provider
    #[arg(
        long,
        value_name = "URL",
        env = "WEATHER_API_BASE_URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub api_base_url: String,

    /// Pause in milliseconds between submitting a search and sending it
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TRANSITION_DELAY_MS)]
    pub transition_delay_ms: u64,

    /// Start with the dark theme
    #[arg(long)]
    pub dark: bool,

    /// Write logs to this file instead of the default data directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// City searched automatically on startup
    pub city: String,
    /// Provider base URL
    pub api_base_url: String,
    /// Pause before each submitted search is sent
    pub transition_delay: Duration,
    /// Initial theme
    pub theme: Theme,
    /// Explicit log file location
    pub log_file: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            transition_delay: Duration::from_millis(DEFAULT_TRANSITION_DELAY_MS),
            theme: Theme::Light,
            log_file: None,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with a trimmed city
    /// * `Err(CliError)` if the city is empty or the base URL is unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let city = cli.city.trim();
        if city.is_empty() {
            return Err(CliError::EmptyCity);
        }

        if WeatherClient::new(&cli.api_base_url).is_err() {
            return Err(CliError::InvalidBaseUrl(cli.api_base_url.clone()));
        }

        Ok(StartupConfig {
            city: city.to_string(),
            api_base_url: cli.api_base_url.clone(),
            transition_delay: Duration::from_millis(cli.transition_delay_ms),
            theme: if cli.dark { Theme::Dark } else { Theme::Light },
            log_file: cli.log_file.clone(),
        })
    }
}
