use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::info;
use trend::Orientation;

use crate::error::SourceError;
use crate::history::PriceHistory;

/// Read a market history file with one `YYYYMMDD Price` record per line.
///
/// The price may be separated from the date by spaces, tabs or a comma.
/// Blank lines are skipped. Lines are chronological.
pub fn read_price_file<P: AsRef<Path>>(filename: P) -> Result<PriceHistory, SourceError> {
    let path = filename.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let history = parse_price_lines(file)?;
    info!("loaded {} closes from {}", history.len(), path.display());
    Ok(history)
}

pub fn parse_price_lines<R: Read>(reader: R) -> Result<PriceHistory, SourceError> {
    let reader = BufReader::new(reader);
    let mut prices = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line_no = line_num + 1;
        let line = line_result.map_err(|source| SourceError::Read {
            line: line_no,
            source,
        })?;

        if line.trim().is_empty() {
            continue;
        }

        let malformed = |reason: &str| SourceError::Malformed {
            line: line_no,
            reason: reason.to_string(),
        };

        // Parse the date (first 8 characters)
        let date_str = line.get(..8).ok_or_else(|| malformed("line too short"))?;
        if !date_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed("invalid date"));
        }

        let price_str = line[8..]
            .split([' ', '\t', ','])
            .find(|s| !s.is_empty())
            .ok_or_else(|| malformed("no price found"))?;

        let price = price_str
            .parse::<f64>()
            .map_err(|_| malformed("invalid price"))?;

        prices.push(price);
    }

    Ok(PriceHistory::new(prices, Orientation::OldestFirst))
}
