use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage_backend: String,
    pub record_backend: String,
}

/// Liveness check; does not contact the backends
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        storage_backend: state.config.storage_backend().to_string(),
        record_backend: state.config.record_backend().to_string(),
    })
}
