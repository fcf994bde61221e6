// HTTP handlers: index, version, health, status, monitoring control, current snapshot, report export

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::models::ServerMessage;
use crate::report::ReportError;
use crate::version::{HEALTH_SERVICE, NAME, SERVICE, VERSION};

/// JSON `{"error": ...}` response for failed requests.
pub(super) enum ApiError {
    Report(ReportError),
    Internal(String),
}

impl From<ReportError> for ApiError {
    fn from(e: ReportError) -> Self {
        ApiError::Report(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Report(ReportError::NoData) => {
                (StatusCode::BAD_REQUEST, ReportError::NoData.to_string())
            }
            ApiError::Report(e) => {
                tracing::error!(error = %e, operation = "generate_report", "report generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// GET /: service identity and endpoint map.
pub(super) async fn index_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": SERVICE,
        "version": VERSION,
        "endpoints": {
            "websocket": "/ws",
            "health": "/api/health",
            "status": "/api/status",
            "current": "/api/current",
            "start": "/api/monitoring/start (POST)",
            "stop": "/api/monitoring/stop (POST)",
            "generate_report": "/api/generate_report (POST)",
        },
    }))
}

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

pub(super) async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": HEALTH_SERVICE,
    }))
}

pub(super) async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.status())
}

pub(super) async fn start_handler(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.session.start().await;
    Json(ServerMessage::monitoring_status(status))
}

pub(super) async fn stop_handler(State(state): State<AppState>) -> impl IntoResponse {
    let status = state.session.stop().await;
    Json(ServerMessage::monitoring_status(status))
}

/// GET /api/current: takes a snapshot now; it is appended to the history like a tick.
pub(super) async fn current_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.record_snapshot().await)
}

/// POST /api/generate_report: renders the whole history and returns it as an attachment.
pub(super) async fn generate_report_handler(
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let history = state.session.history();
    let exporter = state.exporter.clone();
    let report = tokio::task::spawn_blocking(move || exporter.export(&history))
        .await
        .map_err(|e| ApiError::Internal(format!("report task failed: {e}")))??;

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, report.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}
