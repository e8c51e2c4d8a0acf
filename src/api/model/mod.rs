//! Churn model API endpoints
//!
//! Serves the artifact loaded at startup: metadata, class probabilities
//! and the expected-loss figure derived from them. All routes require a
//! valid JWT; inference additionally requires the predict permission.

use std::collections::HashMap;

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::pipeline::FeatureValue;

/// Permission required to run inference
pub const PREDICT_PERMISSION: &str = "model:predict";

/// Raw input column holding the client's estimated salary, used by the
/// loss formula
const ESTIMATED_SALARY_COLUMN: usize = 8;

/// Create the model router
pub fn create_model_router() -> Router<AppState> {
    Router::new()
        .route("/", get(metadata))
        .route("/predict", post(predict))
        .route("/loss", post(loss))
}

/// Model metadata response
#[derive(Debug, Serialize)]
pub struct ModelMetadataResponse {
    pub id: String,
    pub trained_at: String,
    pub params: HashMap<String, serde_json::Value>,
    pub metrics: HashMap<String, f64>,
    pub extra: HashMap<String, serde_json::Value>,
}

/// Inference request: rows of raw feature values
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub input: Vec<Vec<FeatureValue>>,
}

/// Class probabilities per input row, class 0 first
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub output: Vec<[f64; 2]>,
}

/// Expected loss per input row
#[derive(Debug, Serialize)]
pub struct LossResponse {
    pub output: Vec<f64>,
}

/// Describe the loaded model artifact
///
/// GET /model
pub async fn metadata(
    _auth: RequireUser,
    State(state): State<AppState>,
) -> Result<Json<ModelMetadataResponse>, ApiError> {
    let meta = state.artifacts.meta();

    Ok(Json(ModelMetadataResponse {
        id: meta.id.to_string(),
        trained_at: meta.timestamp.to_rfc3339(),
        params: meta.params.clone(),
        metrics: meta.metrics.clone(),
        extra: meta.extra.clone(),
    }))
}

/// Class probabilities for a batch of rows
///
/// POST /model/predict
pub async fn predict(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    auth.require_permission(PREDICT_PERMISSION)?;

    let output = state.artifacts.pipeline().predict_proba(&request.input)?;

    Ok(Json(PredictResponse { output }))
}

/// Expected loss amount for a batch of rows
///
/// POST /model/loss
///
/// Loss is the class-0 probability times the client's estimated salary
/// share minus the operational cost:
/// `proba0 * (agents_per_client * salary - operational_cost)`.
pub async fn loss(
    RequireUser(auth): RequireUser,
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<LossResponse>, ApiError> {
    auth.require_permission(PREDICT_PERMISSION)?;

    let probas = state.artifacts.pipeline().predict_proba(&request.input)?;
    let params = state.artifacts.params();

    let mut output = Vec::with_capacity(probas.len());

    for (proba, row) in probas.iter().zip(&request.input) {
        let proba0 = proba[0];
        let salary = row
            .get(ESTIMATED_SALARY_COLUMN)
            .and_then(FeatureValue::as_number)
            .ok_or_else(|| {
                ApiError::bad_request(format!(
                    "Column {} (estimated salary) must be numeric",
                    ESTIMATED_SALARY_COLUMN
                ))
            })?;

        output.push(proba0 * (params.agents_per_client * salary - params.operational_cost));
    }

    Ok(Json(LossResponse { output }))
}
