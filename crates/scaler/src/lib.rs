//! Min-Max Feature Scaling
//!
//! Loads a scaler fitted offline alongside the model and applies its
//! forward and inverse affine transforms to feature vectors.

mod minmax;

pub use minmax::MinMaxScaler;

use thiserror::Error;

/// Errors while loading the scaler artifact
#[derive(Debug, Error)]
pub enum ScalerError {
    #[error("Failed to read scaler file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scaler JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Scaler contains non-finite bounds for feature {0}")]
    NonFiniteBounds(usize),
}
