//! KPI handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};
use pulse_core::{EdgeKind, MetricDetail, MetricRecord, Reached};

/// GET /api/kpis - List metrics in creation order
pub async fn list_kpis(State(state): State<Arc<AppState>>) -> Json<Vec<MetricRecord>> {
    Json(state.service.list_metrics())
}

/// GET /api/kpis/:id - One metric with its department, categories, thresholds and status
pub async fn get_kpi(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MetricDetail>, AppError> {
    let detail = state
        .service
        .metric_detail(&id)
        .map_err(AppError::from_core)?;
    Ok(Json(detail))
}

/// Query parameters for impact analysis
#[derive(Debug, Deserialize)]
pub struct ImpactQuery {
    /// `affects` (downstream, default) or `depends_on` (upstream)
    pub direction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImpactResponse {
    pub metric: String,
    pub direction: EdgeKind,
    pub reached: Vec<Reached>,
}

/// GET /api/kpis/:id/impact - Metrics transitively influenced by (or influencing) a metric
pub async fn kpi_impact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ImpactQuery>,
) -> Result<Json<ImpactResponse>, AppError> {
    let direction = match params.direction.as_deref() {
        None => EdgeKind::Affects,
        Some(raw) => raw
            .parse::<EdgeKind>()
            .map_err(|e| AppError::bad_request(&e))?,
    };

    let reached = state
        .service
        .impact(&id, direction)
        .map_err(AppError::from_core)?;

    Ok(Json(ImpactResponse {
        metric: id,
        direction,
        reached,
    }))
}

/// Request body for a telemetry update
#[derive(Debug, Deserialize)]
pub struct UpdateActualRequest {
    pub value: f64,
}

/// POST /api/kpis/:id/actual - Record a new actual value
pub async fn update_actual(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateActualRequest>,
) -> Result<Json<MetricRecord>, AppError> {
    let record = state
        .service
        .update_actual(&id, req.value)
        .map_err(AppError::from_core)?;

    tracing::info!(metric = %id, value = req.value, "Actual value updated");
    Ok(Json(record))
}
