use serde::Serialize;

use crate::error::{Result, TrendError};
use crate::fit::{LinearModel, fit};
use crate::series::SampleSeries;

/// Outcome of one extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub model: LinearModel,
    /// Time units past the last observation
    pub offset: u64,
    /// Time index the model was evaluated at
    pub x: f64,
    pub value: f64,
}

/// A fitted series ready to be extrapolated at any number of offsets.
#[derive(Debug, Clone, Copy)]
pub struct Predictor {
    model: LinearModel,
    last_index: usize,
}

impl Predictor {
    pub fn new(series: &SampleSeries) -> Result<Self> {
        Ok(Self {
            model: fit(series)?,
            last_index: series.last_index(),
        })
    }

    pub fn model(&self) -> LinearModel {
        self.model
    }

    /// Evaluate the fitted line `offset` steps after the last sample.
    pub fn forecast(&self, offset: i64) -> Result<Prediction> {
        if offset < 0 {
            return Err(TrendError::InvalidOffset(offset));
        }

        let offset = offset as u64;
        let x = self.last_index as f64 + offset as f64;
        let value = self.model.evaluate(x);
        if !value.is_finite() {
            return Err(TrendError::NumericOverflow);
        }

        Ok(Prediction {
            model: self.model,
            offset,
            x,
            value,
        })
    }
}

/// Fit `series` and extrapolate `offset` steps past its last sample.
///
/// An offset of 0 evaluates the line at the most recent observation.
pub fn predict(series: &SampleSeries, offset: i64) -> Result<f64> {
    if offset < 0 {
        return Err(TrendError::InvalidOffset(offset));
    }
    Ok(Predictor::new(series)?.forecast(offset)?.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> SampleSeries {
        SampleSeries::from_ordered_values(values).unwrap()
    }

    #[test]
    fn test_linear_scenario() {
        let s = series(&[10.0, 12.0, 14.0, 16.0, 18.0]);

        assert!((predict(&s, 0).unwrap() - 18.0).abs() < 1e-9);
        assert!((predict(&s, 5).unwrap() - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_noisy_scenario() {
        let s = series(&[10.0, 12.0, 11.0, 15.0, 14.0]);

        // 1.1 * 4 + 10.2
        assert!((predict(&s, 0).unwrap() - 14.6).abs() < 1e-9);
        // 1.1 * 7 + 10.2
        assert!((predict(&s, 3).unwrap() - 17.9).abs() < 1e-9);
    }

    #[test]
    fn test_offset_zero_is_fit_at_last_index() {
        let s = series(&[3.0, 9.0, 4.0, 8.0, 6.0, 7.0]);
        let model = fit(&s).unwrap();

        let today = predict(&s, 0).unwrap();
        assert!((today - model.evaluate(s.last_index() as f64)).abs() < 1e-12);
    }

    #[test]
    fn test_near_linear_tracks_last_value() {
        let s = series(&[100.0, 101.02, 101.98, 103.01, 103.99, 105.0]);
        assert!((predict(&s, 0).unwrap() - 105.0).abs() < 0.05);
    }

    #[test]
    fn test_positive_slope_is_monotonic_in_offset() {
        let s = series(&[10.0, 12.0, 11.0, 15.0, 14.0]);
        let predictor = Predictor::new(&s).unwrap();
        assert!(predictor.model().slope() > 0.0);

        let values: Vec<f64> = (0..20)
            .map(|k| predictor.forecast(k).unwrap().value)
            .collect();
        assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let s = series(&[10.0, 12.0]);
        assert_eq!(predict(&s, -1), Err(TrendError::InvalidOffset(-1)));

        let predictor = Predictor::new(&s).unwrap();
        assert_eq!(predictor.forecast(-7), Err(TrendError::InvalidOffset(-7)));
    }

    #[test]
    fn test_overflowing_extrapolation_rejected() {
        // slope 1e308, evaluated at x = 6
        let s = series(&[0.0, 1e308]);
        assert_eq!(predict(&s, 0).unwrap(), 1e308);
        assert_eq!(predict(&s, 5), Err(TrendError::NumericOverflow));
    }

    #[test]
    fn test_forecast_reports_evaluation_point() {
        let s = series(&[10.0, 12.0, 14.0, 16.0, 18.0]);
        let p = Predictor::new(&s).unwrap().forecast(5).unwrap();

        assert_eq!(p.offset, 5);
        assert_eq!(p.x, 9.0);
        assert!((p.model.slope() - 2.0).abs() < 1e-9);
        assert!((p.value - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_newest_first_source_extrapolates_forward() {
        use crate::series::Orientation;

        // table order: today first
        let s = SampleSeries::from_source(&[18.0, 16.0, 14.0, 12.0, 10.0], Orientation::NewestFirst)
            .unwrap();
        assert!((predict(&s, 1).unwrap() - 20.0).abs() < 1e-9);
    }
}
