use crate::error::{Result, TrendError};

/// Minimum number of samples a line can be fitted through.
pub const MIN_SAMPLES: usize = 2;

/// Order in which a source delivers its prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Earliest observation first (CSV downloads, market files)
    OldestFirst,
    /// Most recent observation first (history tables)
    NewestFirst,
}

/// One observation: elapsed time units since the earliest sample and the price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: usize,
    pub y: f64,
}

/// Validated price series with contiguous zero-based time indices, oldest first.
///
/// The x coordinate of each sample is its position, so only the prices are
/// stored. There is no way to mutate a series after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    values: Vec<f64>,
}

impl SampleSeries {
    /// Build a series assigning `x = 0..n-1` in the order given.
    ///
    /// # Errors
    /// * [`TrendError::InsufficientData`] for fewer than two values
    /// * [`TrendError::InvalidValue`] for the first NaN, infinite or negative value
    pub fn from_ordered_values(values: &[f64]) -> Result<Self> {
        if values.len() < MIN_SAMPLES {
            return Err(TrendError::InsufficientData { len: values.len() });
        }

        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(TrendError::InvalidValue { index, value });
        }

        Ok(Self {
            values: values.to_vec(),
        })
    }

    /// Build an oldest-first series from values delivered in `orientation` order.
    pub fn from_source(values: &[f64], orientation: Orientation) -> Result<Self> {
        let series = Self::from_ordered_values(values)?;
        Ok(match orientation {
            Orientation::OldestFirst => series,
            Orientation::NewestFirst => series.reversed(),
        })
    }

    /// New series with the last sample at `x = 0` and the first at `x = n-1`.
    pub fn reversed(&self) -> Self {
        Self {
            values: self.values.iter().rev().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed series; kept for the `len` convention.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Time index of the most recent sample.
    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }

    /// Prices in chronological order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Sample> + Clone + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(x, &y)| Sample { x, y })
    }

    pub fn last(&self) -> Sample {
        let x = self.last_index();
        Sample {
            x,
            y: self.values[x],
        }
    }
}
