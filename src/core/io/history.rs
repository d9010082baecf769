use trend::{Orientation, SampleSeries, TrendError};

/// Closing prices exactly as a source delivered them.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    pub closes: Vec<f64>,
    pub orientation: Orientation,
}

impl PriceHistory {
    pub fn new(closes: Vec<f64>, orientation: Orientation) -> Self {
        Self {
            closes,
            orientation,
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Validate the prices and put them oldest first.
    pub fn to_series(&self) -> Result<SampleSeries, TrendError> {
        SampleSeries::from_source(&self.closes, self.orientation)
    }
}
