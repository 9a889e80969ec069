// File: crates/chart-report/src/error.rs
// Summary: Error type for definition loading and dataset construction.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse chart definitions: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid chart definition '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    #[error("data type '{data_type}' has {actual} values in field '{field}', expected {expected}")]
    ColumnLength {
        data_type: String,
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("interval end {end} is before its start {start}")]
    InvalidInterval { start: i64, end: i64 },
}
