//! Monthly Forecast Pipeline
//!
//! Slices a year of history ending at the target month, scales it, runs
//! one forward pass, and maps the scaled output back to original units.

use crate::store::ArtifactStore;
use crate::ForecastError;
use feature_table::{month_start, FeatureVector};
use tracing::{debug, warn};

/// Number of months the model consumes per forecast
pub const LOOK_BACK: usize = 12;

/// The predict pipeline over a loaded artifact store
pub struct ForecastPipeline {
    store: ArtifactStore,
}

impl ForecastPipeline {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    /// Whether every artifact is available
    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Forecast the feature-0 count for the given month
    ///
    /// Requires the `LOOK_BACK` months preceding the target to be present
    /// in the table. The two secondary features are not forecast; their
    /// last observed scaled values are carried through the inverse
    /// transform, which needs a full vector to invert.
    pub fn predict(&self, year: i32, month: u32) -> Result<i64, ForecastError> {
        let (model, scaler, history) = self.store.ready()?;

        let target =
            month_start(year, month).ok_or(ForecastError::InvalidDate { year, month })?;

        let window = history.window_ending_before(target, LOOK_BACK as u32);
        if window.len() < LOOK_BACK {
            warn!(
                "Only {} of {} months available before {}",
                window.len(),
                LOOK_BACK,
                target
            );
            return Err(ForecastError::NotEnoughHistory);
        }

        let scaled: Vec<FeatureVector> = window.iter().map(|row| scaler.transform(row)).collect();

        let predicted_scaled = model.forecast(&scaled)?;

        let last = scaled[LOOK_BACK - 1];
        let assembled = [predicted_scaled, last[1], last[2]];
        let original = scaler.inverse_transform(&assembled);

        let prediction = original[0].round_ties_even() as i64;
        debug!("Forecast for {target}: {prediction}");
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StubForecaster;
    use crate::store::ArtifactStore;
    use feature_table::{FeatureTable, MonthlyRecord};
    use scaler::MinMaxScaler;

    fn fitted_scaler() -> MinMaxScaler {
        MinMaxScaler::new([10.0, 200.0, 2000.0], [60.0, 900.0, 5000.0])
    }

    fn history_for_2020() -> FeatureTable {
        let rows = (1..=12)
            .map(|m| MonthlyRecord {
                date: month_start(2020, m).unwrap(),
                alcohol: 10.0 + m as f64,
                hit_and_run: 200.0 + m as f64 * 10.0,
                total: 2000.0 + m as f64 * 100.0,
            })
            .collect();
        FeatureTable::from_records(rows).unwrap()
    }

    fn pipeline_with_stub(value: f64) -> ForecastPipeline {
        ForecastPipeline::new(ArtifactStore::from_parts(
            Box::new(StubForecaster::new(value)),
            fitted_scaler(),
            history_for_2020(),
        ))
    }

    #[test]
    fn test_stub_prediction_matches_inverse_transform() {
        // Stub returns 0.5 scaled; feature 0 spans [10, 60], so the
        // prediction in original units is 35.
        let pipeline = pipeline_with_stub(0.5);
        assert_eq!(pipeline.predict(2021, 1).unwrap(), 35);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let pipeline = pipeline_with_stub(0.73);
        let first = pipeline.predict(2021, 1).unwrap();
        let second = pipeline.predict(2021, 1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rounding_is_ties_to_even() {
        // Feature 0 spans [0, 64], so 0.5390625 scaled inverts to exactly
        // 34.5, which rounds down to the even 34
        let pipeline = ForecastPipeline::new(ArtifactStore::from_parts(
            Box::new(StubForecaster::new(0.5390625)),
            MinMaxScaler::new([0.0, 200.0, 2000.0], [64.0, 900.0, 5000.0]),
            history_for_2020(),
        ));
        assert_eq!(pipeline.predict(2021, 1).unwrap(), 34);
    }

    #[test]
    fn test_short_history_is_rejected() {
        // Target mid-year: only 6 prior months exist
        let pipeline = pipeline_with_stub(0.5);
        assert!(matches!(
            pipeline.predict(2020, 7),
            Err(ForecastError::NotEnoughHistory)
        ));
    }

    #[test]
    fn test_target_outside_range_is_rejected() {
        let pipeline = pipeline_with_stub(0.5);
        assert!(matches!(
            pipeline.predict(2024, 6),
            Err(ForecastError::NotEnoughHistory)
        ));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let pipeline = pipeline_with_stub(0.5);
        assert!(matches!(
            pipeline.predict(2021, 13),
            Err(ForecastError::InvalidDate { month: 13, .. })
        ));
    }

    #[test]
    fn test_unready_store_fails_every_request() {
        let store = ArtifactStore::load(&crate::ArtifactPaths::from_dir("/nonexistent"));
        let pipeline = ForecastPipeline::new(store);
        assert!(matches!(
            pipeline.predict(2021, 1),
            Err(ForecastError::NotReady)
        ));
        assert!(matches!(
            pipeline.predict(2020, 7),
            Err(ForecastError::NotReady)
        ));
    }
}
