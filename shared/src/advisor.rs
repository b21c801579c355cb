//! Advisory entry point: forecast in, ranked crops out

use crate::climate::summarize;
use crate::knowledge_base::CROP_KNOWLEDGE_BASE;
use crate::models::{AdvisoryError, ForecastSample, RankedAdvisory};
use crate::scoring::score;

/// Generate a ranked crop advisory against the built-in knowledge base.
///
/// `effective_month` is the sowing month to consider (1-12). Callers that
/// default it to "now" should do so before calling.
pub fn generate_advisory(
    samples: &[ForecastSample],
    soil_type: &str,
    effective_month: u32,
) -> Result<RankedAdvisory, AdvisoryError> {
    let summary =
        summarize(samples, soil_type, effective_month).ok_or(AdvisoryError::NoForecastData)?;
    Ok(score(&summary, CROP_KNOWLEDGE_BASE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_samples_is_no_forecast_data() {
        assert_eq!(
            generate_advisory(&[], "loam", 7),
            Err(AdvisoryError::NoForecastData)
        );
    }

    #[test]
    fn test_advisory_echoes_inputs() {
        let samples = vec![ForecastSample::new(27.0, 70.0, Some(140.0))];
        let advisory = generate_advisory(&samples, "sandy", 11).unwrap();
        assert_eq!(advisory.soil_type, "sandy");
        assert_eq!(advisory.effective_month, 11);
        assert_eq!(advisory.top.len(), 3);
        assert_eq!(advisory.alternates.len(), 4);
        assert!(advisory.summary.contains("Soil Type: sandy"));
    }
}
