use thiserror::Error;

/// Failures raised while building a series, fitting it or extrapolating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("insufficient data: need at least 2 samples to fit a line, got {len}")]
    InsufficientData { len: usize },

    #[error("invalid value at index {index}: {value} (prices must be finite and non-negative)")]
    InvalidValue { index: usize, value: f64 },

    #[error("degenerate series: x values have zero variance")]
    DegenerateSeries,

    #[error("numeric overflow: the fitted line or its prediction is not finite")]
    NumericOverflow,

    #[error("invalid offset {0}: predictions can only look forward (offset >= 0)")]
    InvalidOffset(i64),
}

pub type Result<T> = std::result::Result<T, TrendError>;
