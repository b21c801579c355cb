//! Crop profile models

use serde::{Deserialize, Serialize};

/// Closed range of ideal growing values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IdealRange {
    pub lo: f64,
    pub hi: f64,
}

impl IdealRange {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn midpoint(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }
}

/// Water requirement category of a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
}

impl WaterRequirement {
    /// Parse a category name. Anything other than "high" or "medium" is low.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => WaterRequirement::High,
            "medium" => WaterRequirement::Medium,
            _ => WaterRequirement::Low,
        }
    }
}

impl std::fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterRequirement::Low => write!(f, "low"),
            WaterRequirement::Medium => write!(f, "medium"),
            WaterRequirement::High => write!(f, "high"),
        }
    }
}

/// Static reference record describing a crop's ideal growing conditions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropProfile {
    pub name: &'static str,
    /// Degrees Celsius
    pub ideal_temp: IdealRange,
    /// Millimetres over the season
    pub ideal_rain: IdealRange,
    /// Relative humidity percent
    pub ideal_humidity: IdealRange,
    pub soil_types: &'static [&'static str],
    pub seasons: &'static [&'static str],
    pub sowing_months: &'static [u32],
    pub harvest_months: &'static [u32],
    pub water_requirement: WaterRequirement,
    /// 0 = low demand, 1 = very high
    pub market_demand_index: f64,
    /// 0 = low risk, 1 = very risky
    pub risk_index: f64,
}

impl CropProfile {
    pub fn suits_soil(&self, soil_type: &str) -> bool {
        self.soil_types.contains(&soil_type)
    }

    pub fn is_sowing_month(&self, month: u32) -> bool {
        self.sowing_months.contains(&month)
    }

    pub fn is_harvest_month(&self, month: u32) -> bool {
        self.harvest_months.contains(&month)
    }
}
