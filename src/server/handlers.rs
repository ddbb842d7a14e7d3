//! # Naming Route Handlers
//!
//! JSON in, JSON out. A successful response is the decoded model payload,
//! relayed without re-validation.

use super::{errors::AppError, state::AppState};
use crate::models::{ExplainRequest, GenerateRequest, NamingTask};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::info;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "nameme server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn generate_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidBody {
        task: NamingTask::Generate,
        details: rejection.body_text(),
    })?;
    info!(
        "Received generate request (locale: {}, surname present: {})",
        request.locale(),
        request.surname.is_some()
    );

    app_state
        .naming
        .generate(&request)
        .await
        .map(Json)
        .map_err(|e| AppError::naming(NamingTask::Generate, request.locale(), e))
}

pub async fn explain_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::InvalidBody {
        task: NamingTask::Explain,
        details: rejection.body_text(),
    })?;
    info!("Received explain request (locale: {})", request.locale());

    app_state
        .naming
        .explain(&request)
        .await
        .map(Json)
        .map_err(|e| AppError::naming(NamingTask::Explain, request.locale(), e))
}
