//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use iris_core::{ModelVariant, Prediction};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error, warn};

use crate::state::AppState;
use crate::SERVICE_NAME;

/// Service metadata returned by `GET /`
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub available_endpoints: Vec<String>,
    pub models_loaded: bool,
}

/// Registry status returned by `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub models_loaded: usize,
    pub available_models: Vec<String>,
}

/// Body of `POST /predict`
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub features: Vec<f64>,
    #[serde(default = "default_model_type")]
    pub model_type: String,
}

fn default_model_type() -> String {
    ModelVariant::default().as_str().to_string()
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    metrics::counter!("iris_requests_total", "endpoint" => "root").increment(1);

    Json(ServiceInfo {
        message: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        available_endpoints: vec!["/predict".to_string(), "/health".to_string()],
        models_loaded: !state.registry.is_empty(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    metrics::counter!("iris_requests_total", "endpoint" => "health").increment(1);

    Json(HealthStatus {
        status: "healthy".to_string(),
        models_loaded: state.registry.len(),
        available_models: state.registry.model_names(),
    })
}

/// Main prediction handler
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Prediction>, AppError> {
    metrics::counter!("iris_requests_total", "endpoint" => "predict").increment(1);

    let Json(req) = payload?;
    debug!(model = %req.model_type, features = ?req.features, "Received prediction request");

    let start = Instant::now();
    let prediction = state
        .registry
        .predict(&req.features, &req.model_type)
        .map_err(|e| {
            metrics::counter!("iris_prediction_errors_total", "kind" => e.kind()).increment(1);
            e
        })?;
    let elapsed = start.elapsed();

    metrics::counter!("iris_predictions_total", "model" => prediction.model_used.clone())
        .increment(1);
    metrics::histogram!("iris_prediction_latency_us", "model" => prediction.model_used.clone())
        .record(elapsed.as_micros() as f64);

    debug!(
        model = %prediction.model_used,
        species = %prediction.predicted_species,
        confidence = prediction.confidence,
        latency_us = elapsed.as_micros() as u64,
        "Prediction served"
    );

    Ok(Json(prediction))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => handle.render().into_response(),
        None => AppError::NotFound.into_response(),
    }
}

pub async fn fallback() -> AppError {
    AppError::NotFound
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    Service(iris_core::Error),
    InvalidBody { status: StatusCode, message: String },
    NotFound,
}

impl From<iris_core::Error> for AppError {
    fn from(err: iris_core::Error) -> Self {
        AppError::Service(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Service(err) => {
                let status = if err.is_client_error() {
                    warn!(kind = err.kind(), "Rejected prediction request: {}", err);
                    StatusCode::BAD_REQUEST
                } else {
                    error!(kind = err.kind(), "Prediction failed: {}", err);
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, err.kind(), err.to_string())
            }
            AppError::InvalidBody { status, message } => {
                warn!("Rejected request body: {}", message);
                (status, "invalid_body", message)
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", "Not Found".to_string()),
        };

        let body = json!({
            "detail": message,
            "kind": kind,
        });

        (status, Json(body)).into_response()
    }
}
