use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use probe_model::ScriptSpec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::ApiError, handler::ProbeHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ProbeHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET /probe?name=&pattern= - Run scripts, Prometheus text exposition
    /// - GET /metrics - Exporter self-metrics
    /// - GET /health - Liveness
    /// - GET /api/v1/scripts - Loaded scripts
    /// - GET /api/v1/config - Canonical configuration
    /// - POST /api/v1/reload - Re-read configuration sources
    pub fn router(self) -> Router {
        Router::new()
            .route("/probe", get(probe::<H>))
            .route("/metrics", get(exporter_metrics::<H>))
            .route("/health", get(health))
            .route("/api/v1/scripts", get(list_scripts::<H>))
            .route("/api/v1/config", get(get_config::<H>))
            .route("/api/v1/reload", post(reload::<H>))
            .with_state(self.handler)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ProbeParams {
    /// Exact script name.
    #[serde(default)]
    name: String,
    /// Regular expression searched in script names.
    #[serde(default)]
    pattern: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListScriptsResponse {
    scripts: Vec<Arc<ScriptSpec>>,
    total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ReloadResponse {
    scripts: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /probe
async fn probe<H>(
    State(handler): State<Arc<H>>,
    Query(params): Query<ProbeParams>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ProbeHandler,
{
    let measurements = handler.probe(&params.name, &params.pattern).await?;
    let body = probe_prometheus::render_measurements(&measurements)?;

    Ok(([(header::CONTENT_TYPE, probe_prometheus::CONTENT_TYPE)], body))
}

/// GET /metrics
async fn exporter_metrics<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ProbeHandler,
{
    let body = handler.exporter_metrics().await?;
    Ok(([(header::CONTENT_TYPE, probe_prometheus::CONTENT_TYPE)], body))
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// GET /api/v1/scripts
async fn list_scripts<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ProbeHandler,
{
    let scripts = handler.scripts().await?;
    debug!(target: "probe.api", count = scripts.len(), "scripts listed");

    let response = ListScriptsResponse {
        total: scripts.len(),
        scripts,
    };
    Ok(Json(response))
}

/// GET /api/v1/config
async fn get_config<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ProbeHandler,
{
    let canonical = handler.config().await?;
    Ok(([(header::CONTENT_TYPE, "application/yaml")], canonical))
}

/// POST /api/v1/reload
async fn reload<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ProbeHandler,
{
    let scripts = handler.reload().await?;
    Ok(Json(ReloadResponse { scripts }))
}
