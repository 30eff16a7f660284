//! Assembles everything a rendering surface needs from one lookup.

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;

use crate::classifier::{classify_in, AdvisoryAlert, Background, DisplayMode};
use crate::constants::OPENWEATHER_ICON_BASE;
use crate::forecast::{normalize_daily, normalize_series, ForecastPoint, SeriesPoint};
use crate::models::{CurrentResponse, ForecastResponse};

/// Current-conditions card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentSummary {
    pub place: String,
    pub country: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl From<&CurrentResponse> for CurrentSummary {
    fn from(current: &CurrentResponse) -> Self {
        let condition = current.weather.first();
        Self {
            place: current.name.clone(),
            country: current.sys.as_ref().and_then(|s| s.country.clone()),
            label: current.label().map(str::to_string),
            description: condition.and_then(|c| c.description.clone()),
            icon_url: condition.and_then(|c| c.icon.as_deref()).map(icon_url),
            temperature_celsius: current.temperature(),
            humidity: current.main.as_ref().and_then(|m| m.humidity),
            wind_speed: current.wind.as_ref().and_then(|w| w.speed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub current: CurrentSummary,
    pub background: Background,
    pub alert: Option<AdvisoryAlert>,
    pub daily: Vec<ForecastPoint>,
    pub series: Vec<SeriesPoint>,
    /// Offset of the searched place, used for dates and times.
    /// Fixed for the whole forecast window, so a DST change inside it
    /// shifts later samples by an hour.
    #[serde(skip)]
    pub offset: FixedOffset,
}

impl WeatherReport {
    /// Runs the classifier on the current payload and the normalizer on the forecast payload
    pub fn build(
        current: &CurrentResponse,
        forecast: &ForecastResponse,
        mode: DisplayMode,
        max_days: usize,
    ) -> Self {
        let classification = classify_in(mode, current.label(), current.temperature());

        let offset = forecast
            .utc_offset_secs()
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        let points = forecast.points();

        Self {
            current: CurrentSummary::from(current),
            background: classification.background,
            alert: classification.alert,
            daily: normalize_daily(&points, &offset, max_days),
            series: normalize_series(&points, &offset),
            offset,
        }
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("{OPENWEATHER_ICON_BASE}/{icon}@2x.png")
}
