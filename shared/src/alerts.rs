//! Harsh weather detection
//!
//! Each forecast sample is checked against fixed thresholds:
//!
//! | Condition     | Trigger                              |
//! |---------------|--------------------------------------|
//! | Heatwave      | temperature >= 40 °C                 |
//! | Cold wave     | temperature <= 5 °C                  |
//! | Strong wind   | wind speed >= 15 m/s                 |
//! | Heavy rain    | rain >= 20 mm over the 3h interval   |
//! | Storm         | condition contains "storm"           |
//! | Snowfall      | condition contains "snow"            |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ForecastSample;

pub const HEATWAVE_CELSIUS: f64 = 40.0;
pub const COLD_WAVE_CELSIUS: f64 = 5.0;
pub const STRONG_WIND_MS: f64 = 15.0;
pub const HEAVY_RAIN_MM: f64 = 20.0;

/// A harsh weather condition detected in one forecast sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarshWeather {
    Heatwave,
    ColdWave,
    StrongWind,
    HeavyRain,
    Storm,
    Snowfall,
}

impl std::fmt::Display for HarshWeather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HarshWeather::Heatwave => "Heatwave",
            HarshWeather::ColdWave => "Cold wave",
            HarshWeather::StrongWind => "Strong wind",
            HarshWeather::HeavyRain => "Heavy rainfall",
            HarshWeather::Storm => "Storm",
            HarshWeather::Snowfall => "Snowfall",
        };
        f.write_str(label)
    }
}

/// Harsh conditions expected at one point of the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarshWeatherWarning {
    pub timestamp: Option<DateTime<Utc>>,
    pub conditions: Vec<HarshWeather>,
}

impl HarshWeatherWarning {
    /// One-line summary, e.g. "2024-07-01 12:00: Heatwave, Strong wind"
    pub fn describe(&self) -> String {
        let when = self
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Unknown time".to_string());
        let conditions: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        format!("{}: {}", when, conditions.join(", "))
    }
}

/// Harsh conditions in a single sample, in table order. Missing readings
/// never trigger.
pub fn detect_harsh_weather(sample: &ForecastSample) -> Vec<HarshWeather> {
    let mut found = Vec::new();

    if let Some(main) = sample.main {
        if main.temperature_celsius >= HEATWAVE_CELSIUS {
            found.push(HarshWeather::Heatwave);
        }
        if main.temperature_celsius <= COLD_WAVE_CELSIUS {
            found.push(HarshWeather::ColdWave);
        }
    }
    if sample.wind_speed.is_some_and(|w| w >= STRONG_WIND_MS) {
        found.push(HarshWeather::StrongWind);
    }
    if sample.rain_or_zero() >= HEAVY_RAIN_MM {
        found.push(HarshWeather::HeavyRain);
    }

    let condition = sample
        .condition
        .as_deref()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if condition.contains("storm") {
        found.push(HarshWeather::Storm);
    }
    if condition.contains("snow") {
        found.push(HarshWeather::Snowfall);
    }

    found
}

/// Warnings for every sample with at least one harsh condition, in forecast
/// order
pub fn harsh_weather_warnings(samples: &[ForecastSample]) -> Vec<HarshWeatherWarning> {
    samples
        .iter()
        .filter_map(|sample| {
            let conditions = detect_harsh_weather(sample);
            (!conditions.is_empty()).then(|| HarshWeatherWarning {
                timestamp: sample.timestamp,
                conditions,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mild() -> ForecastSample {
        ForecastSample {
            wind_speed: Some(3.0),
            condition: Some("Clouds".to_string()),
            ..ForecastSample::new(25.0, 60.0, Some(1.0))
        }
    }

    #[test]
    fn test_mild_weather_is_quiet() {
        assert!(detect_harsh_weather(&mild()).is_empty());
    }

    #[test]
    fn test_temperature_thresholds_are_inclusive() {
        let at = |t: f64| ForecastSample::new(t, 50.0, None);
        assert_eq!(detect_harsh_weather(&at(40.0)), vec![HarshWeather::Heatwave]);
        assert!(detect_harsh_weather(&at(39.9)).is_empty());
        assert_eq!(detect_harsh_weather(&at(5.0)), vec![HarshWeather::ColdWave]);
        assert!(detect_harsh_weather(&at(5.1)).is_empty());
    }

    #[test]
    fn test_wind_and_rain_thresholds_are_inclusive() {
        let windy = ForecastSample {
            wind_speed: Some(15.0),
            ..mild()
        };
        assert_eq!(detect_harsh_weather(&windy), vec![HarshWeather::StrongWind]);

        let breezy = ForecastSample {
            wind_speed: Some(14.9),
            ..mild()
        };
        assert!(detect_harsh_weather(&breezy).is_empty());

        let wet = ForecastSample {
            rain_mm: Some(20.0),
            ..mild()
        };
        assert_eq!(detect_harsh_weather(&wet), vec![HarshWeather::HeavyRain]);

        let damp = ForecastSample {
            rain_mm: Some(19.9),
            ..mild()
        };
        assert!(detect_harsh_weather(&damp).is_empty());
    }

    #[test]
    fn test_condition_text_matches_any_case() {
        let storm = ForecastSample {
            condition: Some("Thunderstorm".to_string()),
            ..mild()
        };
        assert_eq!(detect_harsh_weather(&storm), vec![HarshWeather::Storm]);

        let snow = ForecastSample {
            condition: Some("Snow".to_string()),
            ..ForecastSample::new(-2.0, 90.0, None)
        };
        assert_eq!(
            detect_harsh_weather(&snow),
            vec![HarshWeather::ColdWave, HarshWeather::Snowfall]
        );
    }

    #[test]
    fn test_missing_readings_never_trigger() {
        assert!(detect_harsh_weather(&ForecastSample::default()).is_empty());
    }

    #[test]
    fn test_warnings_skip_quiet_samples() {
        let hot = ForecastSample {
            timestamp: DateTime::from_timestamp(1719835200, 0),
            wind_speed: Some(18.0),
            ..ForecastSample::new(42.0, 20.0, None)
        };
        let warnings = harsh_weather_warnings(&[mild(), hot, mild()]);

        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].conditions,
            vec![HarshWeather::Heatwave, HarshWeather::StrongWind]
        );
        assert_eq!(warnings[0].describe(), "2024-07-01 12:00: Heatwave, Strong wind");
    }
}
