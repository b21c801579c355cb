//! Static crop knowledge base
//!
//! Expert reference data for the crops the engine knows about. The table is
//! loaded with the binary and shared read-only by every scoring call.

use crate::models::{CropProfile, IdealRange, WaterRequirement};

pub static CROP_KNOWLEDGE_BASE: &[CropProfile] = &[
    CropProfile {
        name: "Rice",
        ideal_temp: IdealRange::new(24.0, 35.0),
        ideal_rain: IdealRange::new(150.0, 300.0),
        ideal_humidity: IdealRange::new(60.0, 90.0),
        soil_types: &["clay", "loam"],
        seasons: &["Kharif"],
        sowing_months: &[6, 7, 8],
        harvest_months: &[10, 11, 12],
        water_requirement: WaterRequirement::High,
        market_demand_index: 0.8,
        risk_index: 0.4,
    },
    CropProfile {
        name: "Wheat",
        ideal_temp: IdealRange::new(10.0, 25.0),
        ideal_rain: IdealRange::new(20.0, 100.0),
        ideal_humidity: IdealRange::new(40.0, 60.0),
        soil_types: &["loam", "sandy"],
        seasons: &["Rabi"],
        sowing_months: &[11, 12, 1],
        harvest_months: &[3, 4, 5],
        water_requirement: WaterRequirement::Medium,
        market_demand_index: 0.9,
        risk_index: 0.3,
    },
    CropProfile {
        name: "Maize",
        ideal_temp: IdealRange::new(18.0, 27.0),
        ideal_rain: IdealRange::new(50.0, 150.0),
        ideal_humidity: IdealRange::new(40.0, 70.0),
        soil_types: &["loam", "sandy"],
        seasons: &["Kharif", "Rabi"],
        sowing_months: &[6, 7, 8, 1, 2],
        harvest_months: &[9, 10, 4, 5],
        water_requirement: WaterRequirement::Medium,
        market_demand_index: 0.7,
        risk_index: 0.35,
    },
    CropProfile {
        name: "Sugarcane",
        ideal_temp: IdealRange::new(20.0, 35.0),
        ideal_rain: IdealRange::new(75.0, 150.0),
        ideal_humidity: IdealRange::new(60.0, 80.0),
        soil_types: &["clay", "loam"],
        seasons: &["Annual"],
        sowing_months: &[2, 3, 4],
        harvest_months: &[12, 1],
        water_requirement: WaterRequirement::High,
        market_demand_index: 0.85,
        risk_index: 0.5,
    },
    CropProfile {
        name: "Potato",
        ideal_temp: IdealRange::new(10.0, 20.0),
        ideal_rain: IdealRange::new(50.0, 120.0),
        ideal_humidity: IdealRange::new(60.0, 80.0),
        soil_types: &["loam", "sandy"],
        seasons: &["Rabi"],
        sowing_months: &[10, 11, 12],
        harvest_months: &[2, 3, 4],
        water_requirement: WaterRequirement::Medium,
        market_demand_index: 0.75,
        risk_index: 0.3,
    },
    CropProfile {
        name: "Millets",
        ideal_temp: IdealRange::new(20.0, 32.0),
        ideal_rain: IdealRange::new(30.0, 100.0),
        ideal_humidity: IdealRange::new(30.0, 60.0),
        soil_types: &["sandy", "loam"],
        seasons: &["Kharif"],
        sowing_months: &[6, 7],
        harvest_months: &[9, 10],
        water_requirement: WaterRequirement::Low,
        market_demand_index: 0.6,
        risk_index: 0.15,
    },
    CropProfile {
        name: "Soybean",
        ideal_temp: IdealRange::new(20.0, 30.0),
        ideal_rain: IdealRange::new(60.0, 120.0),
        ideal_humidity: IdealRange::new(50.0, 70.0),
        soil_types: &["loam"],
        seasons: &["Kharif"],
        sowing_months: &[6, 7],
        harvest_months: &[9, 10],
        water_requirement: WaterRequirement::Medium,
        market_demand_index: 0.8,
        risk_index: 0.35,
    },
    CropProfile {
        name: "Chickpea",
        ideal_temp: IdealRange::new(10.0, 25.0),
        ideal_rain: IdealRange::new(20.0, 60.0),
        ideal_humidity: IdealRange::new(40.0, 60.0),
        soil_types: &["loam", "sandy"],
        seasons: &["Rabi"],
        sowing_months: &[10, 11],
        harvest_months: &[2, 3],
        water_requirement: WaterRequirement::Low,
        market_demand_index: 0.7,
        risk_index: 0.25,
    },
];

/// Look up a crop by name (case-insensitive)
pub fn find_crop(name: &str) -> Option<&'static CropProfile> {
    CROP_KNOWLEDGE_BASE
        .iter()
        .find(|crop| crop.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_crop_names_are_unique() {
        let names: HashSet<_> = CROP_KNOWLEDGE_BASE.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), CROP_KNOWLEDGE_BASE.len());
    }

    #[test]
    fn test_reference_data_is_well_formed() {
        for crop in CROP_KNOWLEDGE_BASE {
            assert!(crop.ideal_temp.lo <= crop.ideal_temp.hi, "{}", crop.name);
            assert!(crop.ideal_rain.lo <= crop.ideal_rain.hi, "{}", crop.name);
            assert!(crop.ideal_humidity.lo <= crop.ideal_humidity.hi, "{}", crop.name);
            assert!((0.0..=1.0).contains(&crop.market_demand_index), "{}", crop.name);
            assert!((0.0..=1.0).contains(&crop.risk_index), "{}", crop.name);
            assert!(crop
                .sowing_months
                .iter()
                .chain(crop.harvest_months)
                .all(|m| (1..=12).contains(m)));
        }
    }

    #[test]
    fn test_find_crop() {
        assert_eq!(find_crop("rice").map(|c| c.name), Some("Rice"));
        assert_eq!(find_crop("CHICKPEA").map(|c| c.name), Some("Chickpea"));
        assert!(find_crop("coffee").is_none());
    }
}
