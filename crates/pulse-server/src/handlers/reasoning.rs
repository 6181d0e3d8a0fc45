//! Reasoning handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use pulse_core::ReasoningReport;

/// GET /api/reasoning - Run one reasoning pass and publish its classification
pub async fn run_reasoning(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReasoningReport>, AppError> {
    let report = state.service.run_reasoning().map_err(AppError::from_core)?;
    Ok(Json(report))
}
