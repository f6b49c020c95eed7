//! Predict Route

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

use crate::AppState;
use inference_engine::ForecastError;

/// Request body for the predict endpoint
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub year: i32,
    pub month: u32,
}

/// Successful prediction payload
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: i64,
}

/// Error payload for every failure case
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// Insufficient history is the caller's problem; everything else is ours
fn status_for(err: &ForecastError) -> StatusCode {
    match err {
        ForecastError::NotEnoughHistory => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Forecast the target month from the preceding year of history
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ErrorReply> {
    // A missing or malformed body becomes an error payload rather than
    // the framework's default rejection
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected /predict body: {rejection}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;

    match state.pipeline.predict(request.year, request.month) {
        Ok(prediction) => Ok(Json(PredictResponse { prediction })),
        Err(err) => {
            error!("Error during prediction: {err}");
            Err((
                status_for(&err),
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ))
        }
    }
}
