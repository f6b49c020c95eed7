//! Offline Feature Table Preparation
//!
//! One-time reshaping of the raw "Monatszahlen Verkehrsunfälle" open-data
//! export into the monthly feature table the serving process consumes.

mod transform;

pub use transform::{reshape, write_csv, ProcessedRow, RawRow, CUTOFF_YEAR};

use thiserror::Error;

/// Errors during preprocessing
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No usable rows in the raw export")]
    EmptyOutput,
}
