use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a price source, before any data reaches the core.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open price file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("no `{0}` column in CSV header")]
    MissingColumn(String),

    #[error("line {line}: invalid {column} value {value:?}")]
    InvalidCell {
        line: u64,
        column: String,
        value: String,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
