//! Linear trend estimation over closing-price series.
//!
//! A [`SampleSeries`] is built from values in a known [`Orientation`],
//! [`fit`] computes the ordinary-least-squares line through it and
//! [`predict`] extrapolates that line past the last observation.
//!
//! ```
//! use trend::{predict, SampleSeries};
//!
//! let series = SampleSeries::from_ordered_values(&[10.0, 12.0, 14.0, 16.0, 18.0]).unwrap();
//! assert!((predict(&series, 5).unwrap() - 28.0).abs() < 1e-9);
//! ```

mod error;
mod fit;
mod predict;
mod series;

pub use error::*;
pub use fit::*;
pub use predict::*;
pub use series::*;
