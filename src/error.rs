use thiserror::Error;

/// Errors raised while configuring the service or talking to the weather provider
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key in the environment
    #[error("OPENWEATHER_API_KEY is not set")]
    MissingApiKey,

    /// An environment value could not be parsed
    #[error("Invalid configuration for {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    /// Blank city name
    #[error("Please enter a city name.")]
    EmptyCity,

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Provider answered 404 for the requested place
    #[error("City not found. Please try again.")]
    LocationNotFound,

    /// Provider rejected the API key
    #[error("Weather provider rejected the API key")]
    Unauthorized,

    /// Transport failure or non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body did not match the expected payload
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WeatherError {
    /// True when the error was caused by what the caller asked for rather than by the service
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCity | Self::InvalidCoordinates | Self::LocationNotFound
        )
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::RequestFailed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_are_flagged() {
        assert!(WeatherError::EmptyCity.is_user_error());
        assert!(WeatherError::InvalidCoordinates.is_user_error());
        assert!(WeatherError::LocationNotFound.is_user_error());
        assert!(!WeatherError::Unauthorized.is_user_error());
        assert!(!WeatherError::RequestFailed("boom".into()).is_user_error());
    }

    #[test]
    fn not_found_message_matches_search_prompt() {
        assert_eq!(
            WeatherError::LocationNotFound.to_string(),
            "City not found. Please try again."
        );
    }
}
