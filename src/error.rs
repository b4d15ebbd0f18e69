//! Error types for fetching pages and reading/writing the datasets.
//!
//! Per-source problems (a page that could not be fetched, a page with no
//! recognizable headlines) are not errors at the run level; they are reported
//! through [`crate::models::SourceOutcome`]. Only dataset errors abort a run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A single failed fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Fatal problems with the seed or historical dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("seed dataset {} could not be loaded: {reason}", path.display())]
    SeedMissing { path: PathBuf, reason: String },

    #[error("historical dataset {} exists but could not be read: {reason}", path.display())]
    HistoricalUnreadable { path: PathBuf, reason: String },

    #[error("dataset {} is missing required column {column:?}", path.display())]
    MissingColumns { path: PathBuf, column: &'static str },

    #[error("dataset {} has an invalid row at line {line}: {reason}", path.display())]
    InvalidRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("historical dataset {} could not be written: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
