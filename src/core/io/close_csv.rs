use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info};
use trend::Orientation;

use crate::error::SourceError;
use crate::history::PriceHistory;

/// Header of the closing-price column in downloaded history files.
pub const CLOSE_COLUMN: &str = "Close";

/// Read the `Close` column of a CSV price download.
///
/// Rows are kept in file order, which for these downloads is chronological.
pub fn read_close_csv<P: AsRef<Path>>(path: P) -> Result<PriceHistory, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let history = parse_close_csv(file)?;
    info!("loaded {} closes from {}", history.len(), path.display());
    Ok(history)
}

/// Parse CSV text with a header row, extracting the `Close` column.
pub fn parse_close_csv<R: Read>(reader: R) -> Result<PriceHistory, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let index = reader
        .headers()?
        .iter()
        .position(|h| h == CLOSE_COLUMN)
        .ok_or_else(|| SourceError::MissingColumn(CLOSE_COLUMN.to_string()))?;
    debug!("`{}` is column {}", CLOSE_COLUMN, index);

    let mut closes = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let cell = record.get(index).unwrap_or_default();

        let close = cell.parse::<f64>().map_err(|_| SourceError::InvalidCell {
            line,
            column: CLOSE_COLUMN.to_string(),
            value: cell.to_string(),
        })?;
        closes.push(close);
    }

    Ok(PriceHistory::new(closes, Orientation::OldestFirst))
}
