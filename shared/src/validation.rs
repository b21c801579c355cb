//! Validation and normalisation of advisory request inputs

use crate::models::DEFAULT_SOIL_TYPE;

/// Validate a caller-supplied sowing month
pub fn validate_sowing_month(month: u32) -> Result<(), &'static str> {
    if !(1..=12).contains(&month) {
        return Err("Sowing month must be between 1 and 12");
    }
    Ok(())
}

/// Validate a forecast location string (e.g. "Delhi,IN")
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err("Location cannot be empty");
    }
    if trimmed.len() > 100 {
        return Err("Location must be at most 100 characters");
    }
    Ok(())
}

/// Trim a soil type, falling back to loam when blank. Case is kept, so
/// matching against crop soils stays exact.
pub fn normalize_soil_type(soil_type: Option<&str>) -> String {
    match soil_type.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => DEFAULT_SOIL_TYPE.to_string(),
    }
}

/// Pick the request location, else the farmer's saved one. Blank values
/// count as missing.
pub fn resolve_location(requested: Option<&str>, saved: Option<&str>) -> Option<String> {
    requested
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .or_else(|| saved.map(str::trim).filter(|l| !l.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sowing_month() {
        assert!(validate_sowing_month(1).is_ok());
        assert!(validate_sowing_month(12).is_ok());
        assert!(validate_sowing_month(0).is_err());
        assert!(validate_sowing_month(13).is_err());
    }

    #[test]
    fn test_validate_location() {
        assert!(validate_location("Delhi,IN").is_ok());
        assert!(validate_location("   ").is_err());
        assert!(validate_location(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_normalize_soil_type() {
        assert_eq!(normalize_soil_type(None), "loam");
        assert_eq!(normalize_soil_type(Some("")), "loam");
        assert_eq!(normalize_soil_type(Some(" Clay ")), "Clay");
        assert_eq!(normalize_soil_type(Some("sandy")), "sandy");
    }

    #[test]
    fn test_resolve_location() {
        assert_eq!(
            resolve_location(Some("Pune,IN"), Some("Delhi,IN")).as_deref(),
            Some("Pune,IN")
        );
        assert_eq!(
            resolve_location(None, Some("Delhi,IN")).as_deref(),
            Some("Delhi,IN")
        );
        assert_eq!(
            resolve_location(Some("  "), Some("Delhi,IN")).as_deref(),
            Some("Delhi,IN")
        );
        assert_eq!(resolve_location(None, None), None);
        assert_eq!(resolve_location(Some(""), Some(" ")), None);
    }
}
