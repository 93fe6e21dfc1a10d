//! GET /api/health - liveness probe.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::AppState;

/// Health response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `true` while the server is answering.
    pub success: bool,
    /// Number of stored access rules.
    pub rules: usize,
}

/// Report liveness and the current rule count.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        rules: state.store.len(),
    })
}
