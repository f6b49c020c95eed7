//! Forecast Model Implementations

use crate::{ForecastError, LOOK_BACK};
use feature_table::{FeatureVector, FEATURE_COUNT};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

/// A sequence model forecasting the scaled feature-0 value one step ahead
///
/// Abstracted so the pipeline can run against a deterministic stand-in in
/// tests instead of a trained artifact.
pub trait Forecaster: Send + Sync {
    /// Run one forward pass over a full scaled window
    fn forecast(&self, window: &[FeatureVector]) -> Result<f64, ForecastError>;
}

type OnnxPlan = RunnableModel<TypedFact, Box<dyn TypedOp>, TypedModel>;

/// Trained ONNX model executed with tract
pub struct OnnxForecaster {
    plan: OnnxPlan,
}

impl OnnxForecaster {
    /// Load and optimize the model, pinning the input to one
    /// `LOOK_BACK x FEATURE_COUNT` f32 sequence
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ForecastError> {
        let path = path.as_ref();
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| ForecastError::ModelLoad(e.to_string()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, LOOK_BACK, FEATURE_COUNT)),
            )
            .map_err(|e| ForecastError::ModelLoad(e.to_string()))?
            .into_optimized()
            .map_err(|e| ForecastError::ModelLoad(e.to_string()))?
            .into_runnable()
            .map_err(|e| ForecastError::ModelLoad(e.to_string()))?;
        info!("Model loaded from {}", path.display());
        Ok(Self { plan })
    }
}

impl Forecaster for OnnxForecaster {
    fn forecast(&self, window: &[FeatureVector]) -> Result<f64, ForecastError> {
        if window.len() != LOOK_BACK {
            return Err(ForecastError::Inference(format!(
                "expected {} timesteps, got {}",
                LOOK_BACK,
                window.len()
            )));
        }

        // One batch, timestep and feature order preserved
        let mut input = tract_ndarray::Array3::<f32>::zeros((1, LOOK_BACK, FEATURE_COUNT));
        for (t, row) in window.iter().enumerate() {
            for (f, value) in row.iter().enumerate() {
                input[[0, t, f]] = *value as f32;
            }
        }

        let outputs = self
            .plan
            .run(tvec!(Tensor::from(input).into()))
            .map_err(|e| ForecastError::Inference(e.to_string()))?;
        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| ForecastError::Inference(e.to_string()))?;
        let value = view
            .iter()
            .next()
            .copied()
            .ok_or_else(|| ForecastError::Inference("model produced no output".to_string()))?;
        Ok(value as f64)
    }
}

/// Fixed-value forecaster for tests and local development
pub struct StubForecaster {
    value: f64,
}

impl StubForecaster {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Forecaster for StubForecaster {
    fn forecast(&self, window: &[FeatureVector]) -> Result<f64, ForecastError> {
        if window.len() != LOOK_BACK {
            return Err(ForecastError::Inference(format!(
                "expected {} timesteps, got {}",
                LOOK_BACK,
                window.len()
            )));
        }
        Ok(self.value)
    }
}
