//! Pulse Web Server
//!
//! Axum-based REST API over the Pulse KPI graph.
//!
//! - Restrictive CORS policy
//! - Security headers on every response
//! - Sanitized error responses (internal errors are logged, not returned)

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use pulse_core::{Error as CoreError, KpiService};

mod handlers;

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub service: KpiService,
    pub config: ServerConfig,
}

/// Create the router with all routes
pub fn create_router(service: KpiService, config: ServerConfig) -> Router {
    let cors = build_cors(&config);

    let state = Arc::new(AppState { service, config });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // KPIs
        .route("/kpis", get(handlers::list_kpis))
        .route("/kpis/:id", get(handlers::get_kpi))
        .route("/kpis/:id/impact", get(handlers::kpi_impact))
        .route("/kpis/:id/actual", post(handlers::update_actual))
        // Reasoning
        .route("/reasoning", get(handlers::run_reasoning))
        // Summaries
        .route("/departments", get(handlers::department_summary))
        .route("/summary", get(handlers::executive_summary));

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

fn build_cors(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        cors
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Start the server
pub async fn serve(
    service: KpiService,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    info!(
        metrics = service.metric_count(),
        "Serving KPI graph"
    );

    let app = create_router(service, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error onto a status code
    pub fn from_core(err: CoreError) -> Self {
        match &err {
            CoreError::NotFound(_) => Self::not_found(&err.to_string()),
            CoreError::InvalidData(_) | CoreError::InvalidRelation(_) => {
                Self::bad_request(&err.to_string())
            }
            CoreError::NoData => Self::internal("No KPI data found"),
            CoreError::Reasoning { phase, .. } => {
                let message = format!("Reasoning failed during {}", phase);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    internal: Some(err.into()),
                }
            }
            _ => Self::from(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
