//! Error types for dataset ingestion.
//!
//! Per-field parse problems (dates, time slots) degrade silently; only
//! structural problems with the dataset surface here.

use thiserror::Error;

/// Errors that stop a dataset from loading.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("missing required column {0}")]
    MissingColumn(String),

    #[error("invalid number {value:?} in column {column} at row {row}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
