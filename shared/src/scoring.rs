//! Crop scoring engine
//!
//! Every crop is scored on eight independent, additive factors:
//!
//! | Factor        | Points     |
//! |---------------|------------|
//! | Temperature   | 0-30       |
//! | Rainfall      | 0-20       |
//! | Humidity      | 0-10       |
//! | Soil          | 3 or 10    |
//! | Season        | 3, 7 or 15 |
//! | Water         | 3-10       |
//! | Market demand | 0-5        |
//! | Risk safety   | 0-10       |
//!
//! Totals are rounded to one decimal before ranking, so crops whose raw
//! totals differ by less than 0.05 may tie and keep knowledge base order.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    ClimateSummary, CropMeta, CropProfile, CropScore, RankedAdvisory, WaterRequirement,
};

/// Number of crops in the top recommendations
pub const TOP_COUNT: usize = 3;

/// Number of crops offered as alternates after the top picks
pub const ALTERNATE_COUNT: usize = 4;

/// Where the sowing month falls in a crop's calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonFit {
    IdealSowing,
    NearHarvest,
    OffSeason,
}

impl SeasonFit {
    /// Sowing months take priority over harvest months
    pub fn classify(crop: &CropProfile, month: u32) -> Self {
        if crop.is_sowing_month(month) {
            SeasonFit::IdealSowing
        } else if crop.is_harvest_month(month) {
            SeasonFit::NearHarvest
        } else {
            SeasonFit::OffSeason
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            SeasonFit::IdealSowing => 15.0,
            SeasonFit::NearHarvest => 7.0,
            SeasonFit::OffSeason => 3.0,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SeasonFit::IdealSowing => "Ideal sowing month",
            SeasonFit::NearHarvest => "Near harvest period",
            SeasonFit::OffSeason => "Off-season",
        }
    }
}

/// The eight factor scores of one crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentScores {
    pub temperature: f64,
    pub rainfall: f64,
    pub humidity: f64,
    pub soil: f64,
    pub season: SeasonFit,
    pub water: f64,
    pub market: f64,
    pub risk: f64,
}

impl ComponentScores {
    /// Compute every factor for a crop. Factors never depend on each other.
    pub fn compute(summary: &ClimateSummary, crop: &CropProfile) -> Self {
        let temp_diff = (summary.avg_temp - crop.ideal_temp.midpoint()).abs();
        let rain_diff = (summary.total_rain - crop.ideal_rain.midpoint()).abs();
        let humidity_diff = (summary.avg_humidity - crop.ideal_humidity.midpoint()).abs();

        Self {
            temperature: (30.0 - temp_diff * 2.0).max(0.0),
            rainfall: (20.0 - rain_diff / 10.0).max(0.0),
            humidity: (10.0 - humidity_diff / 5.0).max(0.0),
            soil: if crop.suits_soil(&summary.soil_type) {
                10.0
            } else {
                3.0
            },
            season: SeasonFit::classify(crop, summary.effective_month),
            water: water_match_score(crop.water_requirement, summary.total_rain),
            market: crop.market_demand_index * 5.0,
            risk: (1.0 - crop.risk_index) * 10.0,
        }
    }

    /// Unrounded sum of all factors
    pub fn total(&self) -> f64 {
        self.temperature
            + self.rainfall
            + self.humidity
            + self.soil
            + self.season.points()
            + self.water
            + self.market
            + self.risk
    }

    /// Display annotations in scoring order
    pub fn breakdown(&self) -> Vec<String> {
        vec![
            format!("Temp Fit: {:.1}/30", self.temperature),
            format!("Rain Fit: {:.1}/20", self.rainfall),
            format!("Humidity Fit: {:.1}/10", self.humidity),
            format!("Soil Match: {}/10", self.soil),
            format!("Season Fit: {}", self.season.label()),
            format!("Water Fit: {}/10", self.water),
            format!("Market Demand: {:.1}/5", self.market),
            format!("Risk Safety: {:.1}/10", self.risk),
        ]
    }
}

/// Score how well the forecast rainfall meets a water requirement.
///
/// Brackets are inclusive and checked top to bottom.
pub fn water_match_score(requirement: WaterRequirement, total_rain: f64) -> f64 {
    match requirement {
        WaterRequirement::High => {
            if total_rain >= 120.0 {
                10.0
            } else if total_rain >= 80.0 {
                7.0
            } else {
                3.0
            }
        }
        WaterRequirement::Medium => {
            if (60.0..=150.0).contains(&total_rain) {
                10.0
            } else if (40.0..=200.0).contains(&total_rain) {
                7.0
            } else {
                4.0
            }
        }
        WaterRequirement::Low => {
            if total_rain <= 80.0 {
                10.0
            } else if total_rain <= 150.0 {
                7.0
            } else {
                3.0
            }
        }
    }
}

/// Score a single crop
pub fn score_crop(summary: &ClimateSummary, crop: &CropProfile) -> CropScore {
    let components = ComponentScores::compute(summary, crop);

    CropScore {
        name: crop.name.to_string(),
        total_score: round_to_tenth(components.total()),
        breakdown: components.breakdown(),
        meta: CropMeta {
            seasons: crop.seasons.iter().map(|s| s.to_string()).collect(),
            water_requirement: crop.water_requirement,
        },
    }
}

/// Score every crop, rank by rounded total and split into top picks and
/// alternates.
pub fn score(summary: &ClimateSummary, knowledge_base: &[CropProfile]) -> RankedAdvisory {
    let mut scored: Vec<CropScore> = knowledge_base
        .iter()
        .map(|crop| score_crop(summary, crop))
        .collect();

    // Stable: equal rounded totals keep knowledge base order
    scored.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    let alternates: Vec<CropScore> = scored
        .iter()
        .skip(TOP_COUNT)
        .take(ALTERNATE_COUNT)
        .cloned()
        .collect();
    scored.truncate(TOP_COUNT);

    RankedAdvisory {
        summary: summary.describe(),
        avg_temp: summary.avg_temp,
        avg_humidity: summary.avg_humidity,
        total_rain: summary.total_rain,
        soil_type: summary.soil_type.clone(),
        effective_month: summary.effective_month,
        top: scored,
        alternates,
    }
}

/// Round half away from zero to one decimal place.
///
/// Works on the exact binary value of `value`, so 0.15 (stored as
/// 0.1499999...) rounds down to 0.1.
pub fn round_to_tenth(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge_base::{find_crop, CROP_KNOWLEDGE_BASE};

    fn summary(avg_temp: f64, avg_humidity: f64, total_rain: f64, month: u32) -> ClimateSummary {
        ClimateSummary {
            avg_temp,
            avg_humidity,
            total_rain,
            effective_month: month,
            soil_type: "loam".to_string(),
        }
    }

    #[test]
    fn test_high_water_brackets() {
        let high = WaterRequirement::High;
        assert_eq!(water_match_score(high, 120.0), 10.0);
        assert_eq!(water_match_score(high, 119.9), 7.0);
        assert_eq!(water_match_score(high, 80.0), 7.0);
        assert_eq!(water_match_score(high, 79.9), 3.0);
        assert_eq!(water_match_score(high, 0.0), 3.0);
    }

    #[test]
    fn test_medium_water_brackets() {
        let medium = WaterRequirement::Medium;
        assert_eq!(water_match_score(medium, 60.0), 10.0);
        assert_eq!(water_match_score(medium, 150.0), 10.0);
        assert_eq!(water_match_score(medium, 151.0), 7.0);
        assert_eq!(water_match_score(medium, 59.9), 7.0);
        assert_eq!(water_match_score(medium, 40.0), 7.0);
        assert_eq!(water_match_score(medium, 200.0), 7.0);
        assert_eq!(water_match_score(medium, 39.9), 4.0);
        assert_eq!(water_match_score(medium, 200.1), 4.0);
    }

    #[test]
    fn test_low_water_brackets() {
        let low = WaterRequirement::Low;
        assert_eq!(water_match_score(low, 80.0), 10.0);
        assert_eq!(water_match_score(low, 80.1), 7.0);
        assert_eq!(water_match_score(low, 150.0), 7.0);
        assert_eq!(water_match_score(low, 150.1), 3.0);
    }

    #[test]
    fn test_sowing_month_beats_harvest_month() {
        let crop = CropProfile {
            sowing_months: &[5],
            harvest_months: &[5],
            ..CROP_KNOWLEDGE_BASE[0].clone()
        };
        assert_eq!(SeasonFit::classify(&crop, 5), SeasonFit::IdealSowing);
        assert_eq!(SeasonFit::classify(&crop, 5).points(), 15.0);
    }

    #[test]
    fn test_rice_components_in_july() {
        let rice = find_crop("Rice").unwrap();
        let c = ComponentScores::compute(&summary(27.0, 70.0, 140.0, 7), rice);

        assert_eq!(c.temperature, 25.0);
        assert_eq!(c.rainfall, 11.5);
        assert_eq!(c.humidity, 9.0);
        assert_eq!(c.soil, 10.0);
        assert_eq!(c.season, SeasonFit::IdealSowing);
        assert_eq!(c.water, 10.0);
        assert!((c.market - 4.0).abs() < 1e-9);
        assert!((c.risk - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsuited_soil_scores_three() {
        let soybean = find_crop("Soybean").unwrap();
        let mut s = summary(25.0, 60.0, 90.0, 6);
        s.soil_type = "clay".to_string();
        assert_eq!(ComponentScores::compute(&s, soybean).soil, 3.0);
    }

    #[test]
    fn test_breakdown_order() {
        let scored = score_crop(&summary(27.0, 70.0, 140.0, 1), find_crop("Sugarcane").unwrap());
        let prefixes = [
            "Temp Fit",
            "Rain Fit",
            "Humidity Fit",
            "Soil Match",
            "Season Fit",
            "Water Fit",
            "Market Demand",
            "Risk Safety",
        ];
        assert_eq!(scored.breakdown.len(), prefixes.len());
        for (line, prefix) in scored.breakdown.iter().zip(prefixes) {
            assert!(line.starts_with(prefix), "{} should start with {}", line, prefix);
        }
        assert_eq!(scored.breakdown[4], "Season Fit: Near harvest period");
        assert_eq!(scored.breakdown[3], "Soil Match: 10/10");
    }

    #[test]
    fn test_round_to_tenth() {
        assert!((round_to_tenth(64.25) - 64.3).abs() < 1e-9);
        assert!((round_to_tenth(88.44) - 88.4).abs() < 1e-9);
        assert_eq!(round_to_tenth(90.5), 90.5);
    }

    #[test]
    fn test_round_to_tenth_uses_exact_binary_value() {
        assert_eq!(round_to_tenth(0.15), 0.1);
        assert_eq!(round_to_tenth(72.54999999999999716), 72.5);
        assert_eq!(round_to_tenth(0.25), 0.3);
    }

    #[test]
    fn test_potato_total_just_below_midpoint() {
        // Raw total sums to 72.5499999... in binary
        let potato = find_crop("Potato").unwrap();
        let s = summary(15.0, 30.0, 13.0, 7);
        let c = ComponentScores::compute(&s, potato);
        assert_eq!(c.total(), 72.55);
        assert_eq!(score_crop(&s, potato).total_score, 72.5);
    }

    #[test]
    fn test_small_knowledge_base_slices() {
        let s = summary(27.0, 70.0, 140.0, 7);
        let ranked = score(&s, &CROP_KNOWLEDGE_BASE[..2]);
        assert_eq!(ranked.top.len(), 2);
        assert!(ranked.alternates.is_empty());

        let ranked = score(&s, &CROP_KNOWLEDGE_BASE[..5]);
        assert_eq!(ranked.top.len(), 3);
        assert_eq!(ranked.alternates.len(), 2);

        let ranked = score(&s, &[]);
        assert!(ranked.top.is_empty());
        assert!(ranked.alternates.is_empty());
    }
}
