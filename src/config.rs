//! Environment-driven configuration

use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_DAILY_LIMIT, DEFAULT_TIMEOUT_SECS, OPENWEATHER_API_BASE};
use crate::error::WeatherError;

const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
const API_BASE_VAR: &str = "OPENWEATHER_API_BASE";
const TIMEOUT_VAR: &str = "WEATHER_TIMEOUT_SECS";
const DAILY_LIMIT_VAR: &str = "WEATHER_DAILY_LIMIT";

/// Settings for the provider client and the presentation layer
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Maximum number of daily forecast cards
    pub daily_limit: usize,
}

impl WeatherConfig {
    /// Builds a configuration with defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENWEATHER_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            daily_limit: DEFAULT_DAILY_LIMIT,
        }
    }

    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, WeatherError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, WeatherError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(API_BASE_VAR).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            config.timeout_secs = parse_var(TIMEOUT_VAR, &raw)?;
        }
        if let Some(raw) = lookup(DAILY_LIMIT_VAR) {
            config.daily_limit = parse_var(DAILY_LIMIT_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(name: &'static str, raw: &str) -> Result<T, WeatherError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| WeatherError::InvalidConfig {
            name,
            reason: e.to_string(),
        })
}
