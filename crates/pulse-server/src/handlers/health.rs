//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub graph_loaded: bool,
    pub metrics: usize,
}

/// GET /api/health - Liveness and graph status
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        graph_loaded: true,
        metrics: state.service.metric_count(),
    })
}
