//! Climate summary and ranked advisory models

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::crop::WaterRequirement;

/// Soil type assumed when the grower does not declare one
pub const DEFAULT_SOIL_TYPE: &str = "loam";

/// Aggregate statistics derived from a forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateSummary {
    pub avg_temp: f64,
    pub avg_humidity: f64,
    pub total_rain: f64,
    /// Sowing month considered, 1-12
    pub effective_month: u32,
    pub soil_type: String,
}

impl ClimateSummary {
    /// Human-readable summary. Display only.
    pub fn describe(&self) -> String {
        format!(
            "Climate Summary:\n\
             Temperature: {:.1}°C\n\
             Humidity: {:.1}%\n\
             Total Rainfall (forecast window): {:.1} mm\n\
             Soil Type: {}\n\
             Sowing Month Considered: {}\n",
            self.avg_temp, self.avg_humidity, self.total_rain, self.soil_type, self.effective_month
        )
    }
}

/// Metadata echoed from the crop profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropMeta {
    pub seasons: Vec<String>,
    pub water_requirement: WaterRequirement,
}

/// Score of a single crop against a climate summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropScore {
    pub name: String,
    /// Sum of all factors, rounded to one decimal
    pub total_score: f64,
    /// One annotation per factor, in scoring order
    pub breakdown: Vec<String>,
    pub meta: CropMeta,
}

/// Sorted crop scores split into top picks and alternates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedAdvisory {
    pub summary: String,
    pub avg_temp: f64,
    pub avg_humidity: f64,
    pub total_rain: f64,
    pub soil_type: String,
    pub effective_month: u32,
    pub top: Vec<CropScore>,
    pub alternates: Vec<CropScore>,
}

/// Outcomes for which no advisory can be produced
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdvisoryError {
    #[error("No forecast data available")]
    NoForecastData,
}
