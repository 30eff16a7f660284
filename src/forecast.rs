//! Reduces forecast samples to daily cards and a chart series.

use std::collections::HashSet;
use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One forecast sample as delivered by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// `None` when the provider sent no usable timestamp
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature_celsius: f64,
    pub label: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl ForecastPoint {
    pub fn new(timestamp: DateTime<Utc>, temperature_celsius: f64, label: &str) -> Self {
        Self {
            timestamp: Some(timestamp),
            temperature_celsius,
            label: Some(label.to_string()),
            description: None,
            icon: None,
        }
    }

    /// Calendar date of the sample in `tz`
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.with_timezone(tz).date_naive())
    }
}

/// Chart sample at full resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Time of day, `HH:MM`
    pub time: String,
    pub temperature_celsius: f64,
}

/// Keeps the first sample of each calendar day, in input order, up to `max_days` entries.
///
/// Samples without a timestamp or without a condition label are skipped.
/// Dates are taken in `tz`.
pub fn normalize_daily<Tz: TimeZone>(
    samples: &[ForecastPoint],
    tz: &Tz,
    max_days: usize,
) -> Vec<ForecastPoint> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut daily = Vec::new();

    for sample in samples {
        if daily.len() >= max_days {
            break;
        }
        let Some(date) = sample.date_in(tz) else {
            tracing::debug!("Skipping forecast sample without timestamp");
            continue;
        };
        if sample.label.is_none() {
            tracing::debug!("Skipping forecast sample for {} without condition label", date);
            continue;
        }
        if seen.insert(date) {
            daily.push(sample.clone());
        }
    }

    daily
}

/// Projects every timestamped sample to a `(HH:MM, temperature)` pair in input order.
pub fn normalize_series<Tz>(samples: &[ForecastPoint], tz: &Tz) -> Vec<SeriesPoint>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    samples
        .iter()
        .filter_map(|sample| match sample.timestamp {
            Some(ts) => Some(SeriesPoint {
                time: ts.with_timezone(tz).format("%H:%M").to_string(),
                temperature_celsius: sample.temperature_celsius,
            }),
            None => {
                tracing::debug!("Dropping chart sample without timestamp");
                None
            }
        })
        .collect()
}
