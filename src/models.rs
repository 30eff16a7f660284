use chrono::{DateTime, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::forecast::ForecastPoint;

// ============================================================================
// OpenWeatherMap API Models
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionEntry {
    pub main: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    pub country: Option<String>,
}

/// `/weather` response
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
    pub main: Option<MainReadings>,
    pub wind: Option<Wind>,
    #[serde(default)]
    pub name: String,
    pub sys: Option<Sys>,
}

impl CurrentResponse {
    /// Label of the primary condition, if any
    pub fn label(&self) -> Option<&str> {
        self.weather.first().and_then(|w| w.main.as_deref())
    }

    pub fn temperature(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// Unix seconds
    #[serde(default, deserialize_with = "lenient_i64")]
    pub dt: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dt_txt: Option<String>,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

impl ForecastEntry {
    /// Sample instant from `dt`, falling back to `dt_txt`
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.dt
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| {
                self.dt_txt.as_deref().and_then(|raw| {
                    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                        .ok()
                        .map(|naive| naive.and_utc())
                })
            })
    }
}

/// Wrongly typed values read as absent
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| v.as_i64()))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|v| v.as_str().map(str::to_string)))
}

impl From<&ForecastEntry> for ForecastPoint {
    fn from(entry: &ForecastEntry) -> Self {
        let condition = entry.weather.first();
        ForecastPoint {
            timestamp: entry.timestamp(),
            temperature_celsius: entry.main.temp,
            label: condition.and_then(|c| c.main.clone()),
            description: condition.and_then(|c| c.description.clone()),
            icon: condition.and_then(|c| c.icon.clone()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: Option<String>,
    pub country: Option<String>,
    /// Shift from UTC in seconds
    pub timezone: Option<i32>,
}

/// `/forecast` response
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// Raw entries, decoded one by one so a bad record only drops itself
    #[serde(default)]
    pub list: Vec<Value>,
    pub city: Option<City>,
}

impl ForecastResponse {
    /// Decodes every usable entry; entries without a temperature are skipped
    pub fn points(&self) -> Vec<ForecastPoint> {
        self.list
            .iter()
            .filter_map(|raw| match ForecastEntry::deserialize(raw) {
                Ok(entry) => Some(ForecastPoint::from(&entry)),
                Err(e) => {
                    tracing::debug!("Skipping unreadable forecast entry: {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn utc_offset_secs(&self) -> Option<i32> {
        self.city.as_ref().and_then(|c| c.timezone)
    }
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherByCityRequest {
    pub city: String,
    /// Render with the dark theme, which drops per-condition backgrounds
    #[serde(default)]
    pub dark_mode: bool,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherByCoordinatesRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub dark_mode: bool,
}
