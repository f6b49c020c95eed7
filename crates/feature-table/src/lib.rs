//! Historical Feature Table
//!
//! Monthly accident statistics keyed by date, with range selection for
//! building model input windows.

mod table;

pub use table::{month_start, FeatureTable, MonthlyRecord};

use chrono::NaiveDate;
use thiserror::Error;

/// Number of feature columns tracked per month
pub const FEATURE_COUNT: usize = 3;

/// One month of features: `[alcohol, hit_and_run, total]`
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Errors while loading the feature table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read feature table: {0}")]
    Csv(#[from] csv::Error),
    #[error("Duplicate month {0} in feature table")]
    DuplicateDate(NaiveDate),
}
