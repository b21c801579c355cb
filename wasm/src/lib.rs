//! WebAssembly module for the Crop Advisory Platform
//!
//! Provides client-side computation for:
//! - Offline crop advisories from a cached forecast
//! - Water requirement matching
//! - Browsing the crop knowledge base
//! - Harsh weather warnings for a cached forecast

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{
    find_crop, generate_advisory, harsh_weather_warnings, water_match_score, AdvisoryError,
    CROP_KNOWLEDGE_BASE,
};

/// Generate a ranked advisory from a JSON array of forecast samples.
///
/// Pass `sowing_month = 0` to use the browser's current month.
#[wasm_bindgen]
pub fn generate_advisory_json(
    samples_json: &str,
    soil_type: &str,
    sowing_month: u32,
) -> Result<String, JsValue> {
    let samples: Vec<ForecastSample> = serde_json::from_str(samples_json).map_err(|e| {
        let message = format!("Invalid forecast JSON: {}", e);
        web_sys::console::warn_1(&JsValue::from_str(&message));
        JsValue::from_str(&message)
    })?;

    let month = if sowing_month == 0 {
        js_sys::Date::new_0().get_month() + 1
    } else {
        sowing_month
    };
    validate_sowing_month(month).map_err(JsValue::from_str)?;

    let soil = normalize_soil_type(Some(soil_type));
    advisory_to_json(generate_advisory(&samples, &soil, month))
}

fn advisory_to_json(result: Result<RankedAdvisory, AdvisoryError>) -> Result<String, JsValue> {
    let advisory = result.map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&advisory)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize advisory: {}", e)))
}

/// Harsh weather warnings for a JSON array of forecast samples
#[wasm_bindgen]
pub fn harsh_weather_warnings_json(samples_json: &str) -> Result<String, JsValue> {
    let samples: Vec<ForecastSample> = serde_json::from_str(samples_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid forecast JSON: {}", e)))?;
    serde_json::to_string(&harsh_weather_warnings(&samples))
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize warnings: {}", e)))
}

/// Water fit points (0-10) for a requirement ("low", "medium", "high")
#[wasm_bindgen]
pub fn water_match(requirement: &str, total_rain: f64) -> f64 {
    water_match_score(WaterRequirement::parse_lossy(requirement), total_rain)
}

/// The crop knowledge base as JSON
#[wasm_bindgen]
pub fn crop_knowledge_base_json() -> String {
    serde_json::to_string(CROP_KNOWLEDGE_BASE).unwrap_or_else(|_| "[]".to_string())
}

/// One crop profile as JSON, looked up case-insensitively by name
#[wasm_bindgen]
pub fn crop_profile_json(name: &str) -> Option<String> {
    find_crop(name).and_then(|crop| serde_json::to_string(crop).ok())
}
