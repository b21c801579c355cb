//! Forecast sample models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One weather observation from a short-range forecast
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ForecastSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Temperature and humidity reading; absent when the provider sent none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<MainReading>,
    /// Precipitation accumulated over the sample interval (3h)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain_mm: Option<f64>,
    /// Wind speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Provider condition group, e.g. "Rain", "Thunderstorm", "Snow"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Temperature / humidity part of a forecast sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MainReading {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

impl ForecastSample {
    pub fn new(temperature_celsius: f64, humidity_percent: f64, rain_mm: Option<f64>) -> Self {
        Self {
            timestamp: None,
            main: Some(MainReading {
                temperature_celsius,
                humidity_percent,
            }),
            rain_mm,
            ..Default::default()
        }
    }

    /// Precipitation for this sample, treating a missing value as dry
    pub fn rain_or_zero(&self) -> f64 {
        self.rain_mm.unwrap_or(0.0)
    }
}
