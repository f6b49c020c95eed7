//! Accident Forecast API Server
//!
//! REST API exposing the monthly accident forecast model.

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod routes;

pub use config::ServerConfig;

use inference_engine::{ArtifactPaths, ArtifactStore, ForecastPipeline};

/// Application state shared across handlers
///
/// Artifacts are immutable after startup, so the state is shared behind a
/// plain `Arc` with no locking.
pub struct AppState {
    /// The loaded predict pipeline
    pub pipeline: ForecastPipeline,
}

impl AppState {
    pub fn new(pipeline: ForecastPipeline) -> Self {
        Self { pipeline }
    }
}

/// Root status payload
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub status: String,
    pub endpoints: EndpointList,
}

/// Advertised endpoints
#[derive(Debug, Serialize)]
pub struct EndpointList {
    #[serde(rename = "/predict")]
    pub predict: String,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/predict", post(routes::predict::predict_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Static status route, served regardless of artifact readiness
async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        status: "API is running".to_string(),
        endpoints: EndpointList {
            predict: "POST - Make predictions with year and month".to_string(),
        },
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Load artifacts and run the server
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let paths = ArtifactPaths::from_dir(&config.artifact_dir);
    let store = ArtifactStore::load(&paths);
    if !store.is_ready() {
        warn!("Artifacts incomplete; /predict will fail until the process is restarted with all artifacts present");
    }

    let state = Arc::new(AppState::new(ForecastPipeline::new(store)));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Starting API server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_payload_is_static() {
        let response = root_handler().await;
        let value = serde_json::to_value(&response.0).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "status": "API is running",
                "endpoints": {
                    "/predict": "POST - Make predictions with year and month"
                }
            })
        );
    }
}
