use serde::Serialize;

use crate::error::{Result, TrendError};
use crate::series::SampleSeries;

/// Fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearModel {
    slope: f64,
    intercept: f64,
}

impl LinearModel {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Value of the line at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares line of best fit through `series`.
///
/// # Errors
/// * [`TrendError::DegenerateSeries`] if the x values have zero variance. A
///   series built through [`SampleSeries`] always has distinct x values, so
///   this only fires if that construction invariant has been broken.
/// * [`TrendError::NumericOverflow`] if prices near `f64::MAX` push the
///   slope or intercept out of range.
pub fn fit(series: &SampleSeries) -> Result<LinearModel> {
    least_squares(series.iter().map(|s| (s.x as f64, s.y)))
}

/*
--------------------------------------------------------------------------------
   Closed-form OLS, two passes: means first, then centered cross products.
   Means accumulate x/n and y/n so large prices do not overflow the sums.
--------------------------------------------------------------------------------
*/
fn least_squares<I>(points: I) -> Result<LinearModel>
where
    I: ExactSizeIterator<Item = (f64, f64)> + Clone,
{
    let n = points.len();
    if n == 0 {
        return Err(TrendError::InsufficientData { len: 0 });
    }

    let len = n as f64;
    let (x_mean, y_mean) = points
        .clone()
        .fold((0.0, 0.0), |(mx, my), (x, y)| (mx + x / len, my + y / len));

    let mut numer = 0.0;
    let mut denom = 0.0;
    for (x, y) in points {
        let dx = x - x_mean;
        numer += dx * (y - y_mean);
        denom += dx * dx;
    }

    if denom == 0.0 || !denom.is_finite() {
        return Err(TrendError::DegenerateSeries);
    }

    let slope = numer / denom;
    let intercept = y_mean - slope * x_mean;

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(TrendError::NumericOverflow);
    }

    Ok(LinearModel::new(slope, intercept))
}
