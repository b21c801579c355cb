//! Forecast provider client
//!
//! Fetches the 5-day / 3-hour forecast from OpenWeatherMap by location name
//! and converts it into forecast samples for the advisory engine.

use std::time::Duration;

use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::models::{ForecastSample, MainReading};

/// OpenWeatherMap forecast client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    /// "200" on success; OWM sends it as a string here
    #[serde(default)]
    cod: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: Option<i64>,
    main: Option<OWMMain>,
    rain: Option<OWMForecastRain>,
    wind: Option<OWMWind>,
    #[serde(default)]
    weather: Vec<OWMCondition>,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OWMCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OWMForecastRain {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    #[cfg(test)]
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch the short-range forecast for a location such as "Delhi,IN"
    pub async fn get_forecast(&self, location: &str) -> AppResult<Vec<ForecastSample>> {
        let url = format!("{}/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::ForecastUnavailable(format!("Weather API request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::ForecastUnavailable(format!("Failed to read forecast response: {}", e))
        })?;

        if !status.is_success() {
            return Err(AppError::ForecastUnavailable(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        parse_forecast(&body)
    }
}

/// Parse an OpenWeatherMap forecast payload into samples.
///
/// A payload whose `cod` is not 200 is treated as an upstream failure even
/// when the HTTP status was successful.
fn parse_forecast(body: &str) -> AppResult<Vec<ForecastSample>> {
    let data: OWMForecastResponse = serde_json::from_str(body).map_err(|e| {
        AppError::ForecastUnavailable(format!("Failed to parse forecast response: {}", e))
    })?;

    if !cod_is_ok(data.cod.as_ref()) {
        return Err(AppError::ForecastUnavailable(format!(
            "Weather API returned cod {:?}: {:?}",
            data.cod, data.message
        )));
    }

    Ok(data.list.into_iter().map(convert_item).collect())
}

fn cod_is_ok(cod: Option<&serde_json::Value>) -> bool {
    match cod {
        Some(serde_json::Value::String(s)) => s == "200",
        Some(serde_json::Value::Number(n)) => n.as_u64() == Some(200),
        _ => false,
    }
}

fn convert_item(item: OWMForecastItem) -> ForecastSample {
    ForecastSample {
        timestamp: item.dt.and_then(|dt| DateTime::from_timestamp(dt, 0)),
        main: item.main.map(|main| MainReading {
            temperature_celsius: main.temp.unwrap_or(0.0),
            humidity_percent: main.humidity.unwrap_or(0.0),
        }),
        rain_mm: item.rain.and_then(|r| r.three_hour),
        wind_speed: item.wind.and_then(|w| w.speed),
        condition: item.weather.into_iter().next().map(|c| c.main),
    }
}
