//! Climate summarizer
//!
//! Reduces a forecast into the aggregate statistics the scoring engine works
//! from. Sample order is irrelevant: this is a reduction, not a time series.

use crate::models::{ClimateSummary, ForecastSample};

/// Summarize a forecast for the given soil type and sowing month.
///
/// Temperature and humidity are averaged over the samples that carry a
/// reading; rainfall is summed over every sample with missing values counted
/// as zero. Returns `None` when no sample has a reading.
pub fn summarize(
    samples: &[ForecastSample],
    soil_type: &str,
    effective_month: u32,
) -> Option<ClimateSummary> {
    let mut temp_sum = 0.0;
    let mut humidity_sum = 0.0;
    let mut readings = 0usize;
    let mut total_rain = 0.0;

    for sample in samples {
        if let Some(main) = &sample.main {
            temp_sum += main.temperature_celsius;
            humidity_sum += main.humidity_percent;
            readings += 1;
        }
        total_rain += sample.rain_or_zero();
    }

    if readings == 0 {
        return None;
    }

    Some(ClimateSummary {
        avg_temp: temp_sum / readings as f64,
        avg_humidity: humidity_sum / readings as f64,
        total_rain,
        effective_month,
        soil_type: soil_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_forecast_has_no_summary() {
        assert!(summarize(&[], "loam", 7).is_none());
    }

    #[test]
    fn test_forecast_without_readings_has_no_summary() {
        let samples = vec![
            ForecastSample {
                rain_mm: Some(4.0),
                ..Default::default()
            },
            ForecastSample::default(),
        ];
        assert!(summarize(&samples, "loam", 7).is_none());
    }

    #[test]
    fn test_averages_skip_samples_without_readings() {
        let samples = vec![
            ForecastSample::new(20.0, 60.0, Some(1.5)),
            ForecastSample {
                rain_mm: Some(2.5),
                ..Default::default()
            },
            ForecastSample::new(30.0, 80.0, None),
        ];

        let summary = summarize(&samples, "clay", 3).unwrap();
        assert_eq!(summary.avg_temp, 25.0);
        assert_eq!(summary.avg_humidity, 70.0);
        assert_eq!(summary.total_rain, 4.0);
        assert_eq!(summary.effective_month, 3);
        assert_eq!(summary.soil_type, "clay");
    }

    #[test]
    fn test_describe_rounds_to_one_decimal() {
        let summary = summarize(
            &[
                ForecastSample::new(26.94, 70.06, Some(12.25)),
                ForecastSample::new(26.94, 70.06, None),
            ],
            "loam",
            7,
        )
        .unwrap();
        let text = summary.describe();
        assert!(text.contains("Temperature: 26.9°C"));
        assert!(text.contains("Humidity: 70.1%"));
        assert!(text.contains("Soil Type: loam"));
        assert!(text.contains("Sowing Month Considered: 7"));
    }
}
