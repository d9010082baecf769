//! File-backed price sources.
//!
//! Every reader produces a [`PriceHistory`]: the closing prices in the order
//! the source stores them, tagged with that order. Turning a history into a
//! [`trend::SampleSeries`] is the only place orientation is applied.

mod close_csv;
mod error;
mod history;
mod market;
mod write;

pub use close_csv::*;
pub use error::*;
pub use history::*;
pub use market::*;
pub use write::*;

use std::path::Path;

/// Load a local price file, choosing the reader from the file extension.
///
/// `.csv` files are read as Yahoo-style downloads through their `Close`
/// column; anything else is treated as a `YYYYMMDD Price` market file.
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<PriceHistory, SourceError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_close_csv(path)
    } else {
        read_price_file(path)
    }
}
