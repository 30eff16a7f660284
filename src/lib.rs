//! Weather lookups shaped for display: a background image, at most one
//! advisory alert, daily forecast cards and a chartable temperature series.

pub mod classifier;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod forecast;
pub mod formatters;
pub mod models;
pub mod presentation;
pub mod service;

pub use classifier::{
    classify, classify_in, AdvisoryAlert, Background, Classification, DisplayMode, Severity,
};
pub use client::{Location, OpenWeatherClient};
pub use config::WeatherConfig;
pub use error::WeatherError;
pub use forecast::{normalize_daily, normalize_series, ForecastPoint, SeriesPoint};
pub use presentation::WeatherReport;
