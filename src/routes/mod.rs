// HTTP + WebSocket routes

mod http;
mod ws;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::report::ReportExporter;
use crate::session::MonitorSession;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) session: Arc<MonitorSession>,
    pub(crate) exporter: Arc<ReportExporter>,
}

pub fn app(session: Arc<MonitorSession>, exporter: Arc<ReportExporter>) -> Router {
    let state = AppState { session, exporter };
    Router::new()
        .route("/", get(http::index_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/health", get(http::health_handler)) // GET /api/health
        .route("/api/status", get(http::status_handler)) // GET /api/status
        .route("/api/current", get(http::current_handler)) // GET /api/current
        .route("/api/monitoring/start", post(http::start_handler)) // POST /api/monitoring/start
        .route("/api/monitoring/stop", post(http::stop_handler)) // POST /api/monitoring/stop
        .route("/api/generate_report", post(http::generate_report_handler)) // POST /api/generate_report
        .route("/ws", get(ws::ws_monitor)) // WS /ws
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
