//! OpenWeatherMap HTTP client

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::constants::USER_AGENT;
use crate::error::WeatherError;
use crate::models::{CurrentResponse, ForecastResponse};

/// What to look up
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl Location {
    /// Rejects blank city names and out-of-range coordinates
    pub fn validate(&self) -> Result<(), WeatherError> {
        match self {
            Self::City(name) if name.trim().is_empty() => Err(WeatherError::EmptyCity),
            Self::Coordinates {
                latitude,
                longitude,
            } if !(-90.0..=90.0).contains(latitude) || !(-180.0..=180.0).contains(longitude) => {
                Err(WeatherError::InvalidCoordinates)
            }
            _ => Ok(()),
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("q", name.trim().to_string())],
            Self::Coordinates {
                latitude,
                longitude,
            } => vec![("lat", latitude.to_string()), ("lon", longitude.to_string())],
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(name) => write!(f, "{}", name.trim()),
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{}, {}", latitude, longitude),
        }
    }
}

/// Client for the OpenWeatherMap current and forecast endpoints
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetches current conditions
    pub async fn current(&self, location: &Location) -> Result<CurrentResponse, WeatherError> {
        self.make_request("weather", location).await
    }

    /// Fetches the 5 day / 3 hour forecast
    pub async fn forecast(&self, location: &Location) -> Result<ForecastResponse, WeatherError> {
        self.make_request("forecast", location).await
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        location: &Location,
    ) -> Result<T, WeatherError> {
        location.validate()?;

        let url = format!("{}/{}", self.base_url, endpoint);
        let mut params = location.query();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        tracing::debug!("GET {} for {}", url, location);
        let response = self.client.get(&url).query(&params).send().await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(WeatherError::LocationNotFound),
            StatusCode::UNAUTHORIZED => return Err(WeatherError::Unauthorized),
            status => {
                return Err(WeatherError::RequestFailed(format!(
                    "Request failed with status: {}",
                    status
                )))
            }
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}
