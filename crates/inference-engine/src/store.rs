//! Process-Lifetime Artifact Store

use crate::engine::{Forecaster, OnnxForecaster};
use crate::ForecastError;
use feature_table::FeatureTable;
use scaler::MinMaxScaler;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Locations of the three serialized artifacts
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub history: PathBuf,
}

impl ArtifactPaths {
    /// Conventional artifact layout inside a single directory
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join("lstm_multivar_model.onnx"),
            scaler: dir.join("multivar_scaler.json"),
            history: dir.join("processed_data.csv"),
        }
    }
}

/// Immutable artifacts loaded once at startup
///
/// Each load is attempted independently; a failure is logged and recorded
/// as absent rather than aborting the process. The store never becomes
/// ready after startup, there is no reload path.
pub struct ArtifactStore {
    model: Option<Box<dyn Forecaster>>,
    scaler: Option<MinMaxScaler>,
    history: Option<FeatureTable>,
}

impl ArtifactStore {
    /// Load all three artifacts from disk
    pub fn load(paths: &ArtifactPaths) -> Self {
        let model = match OnnxForecaster::load(&paths.model) {
            Ok(model) => {
                info!("Model loaded successfully");
                Some(Box::new(model) as Box<dyn Forecaster>)
            }
            Err(e) => {
                error!("Failed to load model: {e}");
                None
            }
        };

        let scaler = match MinMaxScaler::load_json(&paths.scaler) {
            Ok(scaler) => {
                info!("Scaler loaded successfully");
                Some(scaler)
            }
            Err(e) => {
                error!("Failed to load scaler: {e}");
                None
            }
        };

        let history = match FeatureTable::load_csv(&paths.history) {
            Ok(table) => {
                info!("Historical data loaded successfully");
                Some(table)
            }
            Err(e) => {
                error!("Failed to load historical data: {e}");
                None
            }
        };

        Self {
            model,
            scaler,
            history,
        }
    }

    /// Build a store from already-constructed artifacts
    ///
    /// Lets tests substitute stub artifacts without touching the
    /// filesystem or process state.
    pub fn from_parts(
        model: Box<dyn Forecaster>,
        scaler: MinMaxScaler,
        history: FeatureTable,
    ) -> Self {
        Self {
            model: Some(model),
            scaler: Some(scaler),
            history: Some(history),
        }
    }

    /// Whether every artifact loaded
    pub fn is_ready(&self) -> bool {
        self.model.is_some() && self.scaler.is_some() && self.history.is_some()
    }

    /// Read-only access to all three artifacts, or the not-ready error
    pub(crate) fn ready(
        &self,
    ) -> Result<(&dyn Forecaster, &MinMaxScaler, &FeatureTable), ForecastError> {
        match (&self.model, &self.scaler, &self.history) {
            (Some(model), Some(scaler), Some(history)) => {
                Ok((model.as_ref(), scaler, history))
            }
            _ => Err(ForecastError::NotReady),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StubForecaster;

    #[test]
    fn test_missing_paths_leave_store_unready() {
        let paths = ArtifactPaths::from_dir("/nonexistent");
        let store = ArtifactStore::load(&paths);
        assert!(!store.is_ready());
        assert!(matches!(store.ready(), Err(ForecastError::NotReady)));
    }

    #[test]
    fn test_partial_store_is_unready() {
        let store = ArtifactStore {
            model: Some(Box::new(StubForecaster::new(0.0))),
            scaler: Some(MinMaxScaler::new([0.0; 3], [1.0; 3])),
            history: None,
        };
        assert!(!store.is_ready());
        assert!(matches!(store.ready(), Err(ForecastError::NotReady)));
    }

    #[test]
    fn test_from_parts_is_ready() {
        let store = ArtifactStore::from_parts(
            Box::new(StubForecaster::new(0.0)),
            MinMaxScaler::new([0.0; 3], [1.0; 3]),
            FeatureTable::from_records(Vec::new()).unwrap(),
        );
        assert!(store.is_ready());
        assert!(store.ready().is_ok());
    }
}
