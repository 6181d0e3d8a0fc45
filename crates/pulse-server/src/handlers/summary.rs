//! Summary handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use pulse_core::{DepartmentSummary, ExecutiveSummary};

/// GET /api/departments - Health per department, keyed by department name
pub async fn department_summary(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, DepartmentSummary>> {
    Json(state.service.department_summary())
}

/// GET /api/summary - Executive summary
pub async fn executive_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ExecutiveSummary>, AppError> {
    let summary = state
        .service
        .executive_summary()
        .map_err(AppError::from_core)?;
    Ok(Json(summary))
}
