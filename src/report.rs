use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use trend::Prediction;

use crate::config::SourceMode;

/// Summary of one prediction run, written as JSON with `--output`.
///
/// The prediction is flattened in, so the fitted line appears under `model`
/// next to `offset`, `x` and `value`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub ticker: String,
    pub source: SourceMode,
    pub samples: usize,
    #[serde(flatten)]
    pub prediction: Prediction,
    pub generated_at: DateTime<Utc>,
}

impl PredictionReport {
    pub fn new(ticker: &str, source: SourceMode, samples: usize, prediction: &Prediction) -> Self {
        Self {
            ticker: ticker.to_string(),
            source,
            samples,
            prediction: *prediction,
            generated_at: Utc::now(),
        }
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        market_io::write_file(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use trend::{Predictor, SampleSeries};

    #[test]
    fn test_write_report() {
        let series = SampleSeries::from_ordered_values(&[10.0, 12.0, 14.0, 16.0, 18.0]).unwrap();
        let prediction = Predictor::new(&series).unwrap().forecast(5).unwrap();
        let report = PredictionReport::new("AAPL", SourceMode::File, series.len(), &prediction);

        let dir = tempdir().unwrap();
        let path = dir.path().join("out/AAPL.json");
        report.write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(value["source"], "file");
        assert_eq!(value["samples"], 5);
        assert_eq!(value["offset"], 5);
        assert_eq!(value["x"], 9.0);
        assert!((value["value"].as_f64().unwrap() - 28.0).abs() < 1e-9);
        assert!((value["model"]["slope"].as_f64().unwrap() - 2.0).abs() < 1e-9);
        assert!((value["model"]["intercept"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        assert!(value["generated_at"].is_string());
    }
}
