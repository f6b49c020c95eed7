//! Forecast Inference Engine
//!
//! Loads the serialized model, scaler, and feature table once at startup
//! and runs the monthly forecast pipeline against them.

mod engine;
mod pipeline;
mod store;

pub use engine::{Forecaster, OnnxForecaster, StubForecaster};
pub use pipeline::{ForecastPipeline, LOOK_BACK};
pub use store::{ArtifactPaths, ArtifactStore};

use thiserror::Error;

/// Errors surfaced by the predict pipeline
#[derive(Debug, Error)]
pub enum ForecastError {
    /// At least one artifact failed to load at startup
    #[error("Model or scaler or historical data not initialized properly.")]
    NotReady,
    /// The feature table covers fewer months than the model needs
    #[error("Not enough historical data to predict. Need at least 12 months of data.")]
    NotEnoughHistory,
    /// The requested year/month does not form a valid calendar date
    #[error("Invalid target date: year {year}, month {month}")]
    InvalidDate { year: i32, month: u32 },
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error("Inference failed: {0}")]
    Inference(String),
}
