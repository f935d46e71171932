//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::inference::{ArticleInput, Prediction};

use super::error::{Result, ServerError};
use super::state::AppState;

/// Message returned by the status endpoint
pub const STATUS_MESSAGE: &str = "Fake News API is running";

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub prediction: Prediction,
}

// ============================================================================
// Status Handler
// ============================================================================

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        ok: true,
        message: STATUS_MESSAGE.to_string(),
    })
}

// ============================================================================
// Inference Handler
// ============================================================================

pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ArticleInput>, JsonRejection>,
) -> Result<Json<PredictResponse>> {
    let Json(request) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let prediction = state.service.predict(&request)?;

    Ok(Json(PredictResponse {
        ok: true,
        prediction,
    }))
}
