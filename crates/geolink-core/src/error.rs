// crates/geolink-core/src/error.rs
use std::fmt;
use thiserror::Error;

/// Which input a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSet {
    Needles,
    Haystack,
}

impl fmt::Display for RecordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSet::Needles => f.write_str("needles"),
            RecordSet::Haystack => f.write_str("haystack"),
        }
    }
}

/// Errors raised while loading, matching, or writing a linkage run.
#[derive(Debug, Error)]
pub enum LinkError {
    /// A row did not carry exactly `id, country, province, city`.
    #[error("malformed record in {set} at row {row}: expected 4 fields, found {found}")]
    MalformedRecord {
        set: RecordSet,
        row: usize,
        found: usize,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, LinkError>;
