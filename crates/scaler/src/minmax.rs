//! Min-Max Scaler Implementation

use crate::ScalerError;
use feature_table::{FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

fn unit_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// Fitted per-feature min-max scaler
///
/// The fit must cover the same features, in the same order, as the feature
/// table and the model's training data. A semantic mismatch cannot be
/// detected here and silently skews every prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    /// Per-feature minimum observed during fitting
    data_min: FeatureVector,
    /// Per-feature maximum observed during fitting
    data_max: FeatureVector,
    /// Target range of the forward transform
    #[serde(default = "unit_range")]
    feature_range: (f64, f64),
}

impl MinMaxScaler {
    /// Build a scaler from known bounds, targeting `[0, 1]`
    pub fn new(data_min: FeatureVector, data_max: FeatureVector) -> Self {
        Self {
            data_min,
            data_max,
            feature_range: unit_range(),
        }
    }

    /// Load the scaler from its JSON artifact
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, ScalerError> {
        let text = fs::read_to_string(path.as_ref())?;
        let scaler: Self = serde_json::from_str(&text)?;
        for i in 0..FEATURE_COUNT {
            if !scaler.data_min[i].is_finite() || !scaler.data_max[i].is_finite() {
                return Err(ScalerError::NonFiniteBounds(i));
            }
        }
        info!("Scaler loaded: range {:?}", scaler.feature_range);
        Ok(scaler)
    }

    /// Fitted span of a feature; a degenerate feature scales with unit span
    fn span(&self, feature: usize) -> f64 {
        let span = self.data_max[feature] - self.data_min[feature];
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }

    /// Map raw feature values into the fitted range
    pub fn transform(&self, row: &FeatureVector) -> FeatureVector {
        let (lo, hi) = self.feature_range;
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (row[i] - self.data_min[i]) / self.span(i) * (hi - lo) + lo;
        }
        out
    }

    /// Map scaled values back to original units
    pub fn inverse_transform(&self, row: &FeatureVector) -> FeatureVector {
        let (lo, hi) = self.feature_range;
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (row[i] - lo) / (hi - lo) * self.span(i) + self.data_min[i];
        }
        out
    }
}
