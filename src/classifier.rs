//! Maps a current condition label and temperature to a background image and
//! at most one advisory alert.

use serde::{Deserialize, Serialize};

use crate::constants::{BACKGROUND_IMAGE_BASE, HEAT_THRESHOLD_CELSIUS};

/// Condition labels with dedicated imagery or alert rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Mist,
}

impl Condition {
    /// Parses a provider label. Matching is exact; anything else is unrecognized.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Clear" => Some(Self::Clear),
            "Clouds" => Some(Self::Clouds),
            "Rain" => Some(Self::Rain),
            "Snow" => Some(Self::Snow),
            "Thunderstorm" => Some(Self::Thunderstorm),
            "Mist" => Some(Self::Mist),
            _ => None,
        }
    }

    /// Query term of the condition's background image
    fn image_query(self) -> &'static str {
        match self {
            Self::Clear => "clear-sky",
            Self::Clouds => "clouds",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "storm",
            Self::Mist => "mist",
        }
    }
}

/// Theme picked by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

/// Background image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Background(String);

impl Background {
    fn for_query(query: &str) -> Self {
        Self(format!("{BACKGROUND_IMAGE_BASE}?{query}"))
    }

    /// Fallback used for unrecognized labels and dark mode
    pub fn fallback() -> Self {
        Self::for_query("weather")
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Transient, dismissible user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryAlert {
    pub severity: Severity,
    pub message: &'static str,
}

pub const THUNDERSTORM_MESSAGE: &str =
    "Thunderstorm warning: stay indoors and keep away from tall objects.";
pub const RAIN_MESSAGE: &str = "It's raining, so take an umbrella and drive carefully.";
pub const SNOW_MESSAGE: &str = "Snow is falling: dress warmly and watch for icy roads.";
pub const HEAT_MESSAGE: &str = "Extreme heat: stay hydrated and avoid the midday sun.";
pub const MIST_MESSAGE: &str = "Mist is reducing visibility. Take care on the road.";

struct AlertRule {
    matches: fn(Option<Condition>, Option<f64>) -> bool,
    alert: AdvisoryAlert,
}

/// Evaluated top to bottom; the first match wins.
const ALERT_RULES: &[AlertRule] = &[
    AlertRule {
        matches: |condition, _| condition == Some(Condition::Thunderstorm),
        alert: AdvisoryAlert {
            severity: Severity::Warning,
            message: THUNDERSTORM_MESSAGE,
        },
    },
    AlertRule {
        matches: |condition, _| condition == Some(Condition::Rain),
        alert: AdvisoryAlert {
            severity: Severity::Info,
            message: RAIN_MESSAGE,
        },
    },
    AlertRule {
        matches: |condition, _| condition == Some(Condition::Snow),
        alert: AdvisoryAlert {
            severity: Severity::Info,
            message: SNOW_MESSAGE,
        },
    },
    AlertRule {
        matches: |_, temperature| temperature.is_some_and(|t| t > HEAT_THRESHOLD_CELSIUS),
        alert: AdvisoryAlert {
            severity: Severity::Warning,
            message: HEAT_MESSAGE,
        },
    },
    AlertRule {
        matches: |condition, _| condition == Some(Condition::Mist),
        alert: AdvisoryAlert {
            severity: Severity::Info,
            message: MIST_MESSAGE,
        },
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub background: Background,
    pub alert: Option<AdvisoryAlert>,
}

/// Classifies current conditions in light mode
pub fn classify(label: Option<&str>, temperature_celsius: Option<f64>) -> Classification {
    classify_in(DisplayMode::Light, label, temperature_celsius)
}

/// Classifies current conditions for the given display mode
pub fn classify_in(
    mode: DisplayMode,
    label: Option<&str>,
    temperature_celsius: Option<f64>,
) -> Classification {
    let condition = label.and_then(Condition::from_label);
    Classification {
        background: background_for(mode, condition),
        alert: alert_for(condition, temperature_celsius),
    }
}

pub fn background_for(mode: DisplayMode, condition: Option<Condition>) -> Background {
    match (mode, condition) {
        (DisplayMode::Light, Some(condition)) => Background::for_query(condition.image_query()),
        _ => Background::fallback(),
    }
}

pub fn alert_for(
    condition: Option<Condition>,
    temperature_celsius: Option<f64>,
) -> Option<AdvisoryAlert> {
    ALERT_RULES
        .iter()
        .find(|rule| (rule.matches)(condition, temperature_celsius))
        .map(|rule| rule.alert.clone())
}
