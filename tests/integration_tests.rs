// Integration tests: HTTP and WebSocket endpoints

mod common;

use axum_test::TestServer;
use common::FakeProbes;
use resmon::report::ReportExporter;
use resmon::routes;
use resmon::session::{MonitorSession, SAMPLE_INTERVAL};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

struct TestApp {
    app: axum::Router,
    session: Arc<MonitorSession>,
    reports: TempDir,
}

fn test_app() -> TestApp {
    let session = Arc::new(
        MonitorSession::new(
            Arc::new(FakeProbes::with_cpu(&[10.0, 50.0, 30.0])),
            16,
            Duration::from_secs(60),
        )
        .with_sample_interval(Duration::from_millis(20)),
    );
    let reports = TempDir::new().unwrap();
    let exporter = Arc::new(ReportExporter::new(reports.path(), SAMPLE_INTERVAL));
    TestApp {
        app: routes::app(session.clone(), exporter),
        session,
        reports,
    }
}

#[tokio::test]
async fn test_root_endpoint() {
    let t = test_app();
    let server = TestServer::new(t.app);
    let response = server.get("/").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["service"], "System Resource Monitor API");
    assert_eq!(json["endpoints"]["websocket"], "/ws");
}

#[tokio::test]
async fn test_version_endpoint() {
    let t = test_app();
    let server = TestServer::new(t.app);
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("resmon"));
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_health_endpoint() {
    let t = test_app();
    let server = TestServer::new(t.app);
    let response = server.get("/api/health").await;
    response.assert_status_ok();
    response.assert_json(&serde_json::json!({
        "status": "healthy",
        "service": "System Monitor API",
    }));
}

#[tokio::test]
async fn test_status_reflects_history() {
    let t = test_app();
    let server = TestServer::new(t.app);
    server
        .get("/api/status")
        .await
        .assert_json(&serde_json::json!({"monitoringActive": false, "dataCount": 0}));

    let current = server.get("/api/current").await;
    current.assert_status_ok();
    let snapshot: serde_json::Value = current.json();
    assert_eq!(snapshot["cpu"]["usagePercent"], 10.0);

    server
        .get("/api/status")
        .await
        .assert_json(&serde_json::json!({"monitoringActive": false, "dataCount": 1}));
}

#[tokio::test]
async fn test_generate_report_without_data_is_400() {
    let t = test_app();
    let server = TestServer::new(t.app);
    let response = server.post("/api/generate_report").await;
    response.assert_status_bad_request();
    response.assert_json(&serde_json::json!({
        "error": "No data available. Start monitoring first.",
    }));
    assert_eq!(std::fs::read_dir(t.reports.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_generate_report_returns_attachment() {
    let t = test_app();
    let server = TestServer::new(t.app);
    server.get("/api/current").await.assert_status_ok();
    server.get("/api/current").await.assert_status_ok();

    let response = server.post("/api/generate_report").await;
    response.assert_status_ok();
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"system_report_"));
    assert!(disposition.ends_with(".html\""));
    assert!(response.text().contains("System Resource Monitoring Report"));
    assert_eq!(std::fs::read_dir(t.reports.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_start_and_stop_endpoints() {
    let t = test_app();
    let server = TestServer::new(t.app);

    let started: serde_json::Value = server.post("/api/monitoring/start").await.json();
    assert_eq!(started["type"], "monitoring_status");
    assert_eq!(started["status"], "started");
    let again: serde_json::Value = server.post("/api/monitoring/start").await.json();
    assert_eq!(again["status"], "already_running");
    assert_eq!(again["message"], "Monitoring already running");

    let stopped: serde_json::Value = server.post("/api/monitoring/stop").await.json();
    assert_eq!(stopped["status"], "stopped");
    let again: serde_json::Value = server.post("/api/monitoring/stop").await.json();
    assert_eq!(again["status"], "already_stopped");

    t.session.shutdown().await;
}

// --- WebSocket tests (require http_transport + ws feature) ---
// Receive until a JSON frame of the wanted type arrives (server may send Ping first).

async fn receive_frame(ws: &mut axum_test::TestWebSocket, frame_type: &str) -> serde_json::Value {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    loop {
        let text = ws.receive_text().await;
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(&text)
            && v["type"] == frame_type
        {
            return v;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {frame_type} frame"
        );
    }
}

#[tokio::test]
async fn test_ws_connection_response() {
    let t = test_app();
    let server = TestServer::builder().http_transport().build(t.app);
    let mut ws = server.get_websocket("/ws").await.into_websocket().await;
    let frame = receive_frame(&mut ws, "connection_response").await;
    assert_eq!(frame["status"], "connected");
}

#[tokio::test]
async fn test_ws_get_current_data_appends() {
    let t = test_app();
    let server = TestServer::builder().http_transport().build(t.app);
    let mut ws = server.get_websocket("/ws").await.into_websocket().await;
    receive_frame(&mut ws, "connection_response").await;

    ws.send_text(r#"{"type":"get_current_data"}"#).await;
    let frame = receive_frame(&mut ws, "system_data").await;
    assert_eq!(frame["data"]["cpu"]["usagePercent"], 10.0);
    assert_eq!(t.session.sample_count(), 1);
}

#[tokio::test]
async fn test_ws_monitoring_commands_and_broadcast() {
    let t = test_app();
    let server = TestServer::builder().http_transport().build(t.app);
    let mut ws = server.get_websocket("/ws").await.into_websocket().await;
    receive_frame(&mut ws, "connection_response").await;

    ws.send_text(r#"{"type":"start_monitoring"}"#).await;
    let status = receive_frame(&mut ws, "monitoring_status").await;
    assert_eq!(status["status"], "started");
    assert_eq!(status["message"], "Monitoring started");

    // Sampling ticks reach the subscriber
    let data = receive_frame(&mut ws, "system_data").await;
    assert!(data["data"]["timestamp"].as_u64().is_some());

    ws.send_text(r#"{"type":"stop_monitoring"}"#).await;
    let status = receive_frame(&mut ws, "monitoring_status").await;
    assert_eq!(status["status"], "stopped");

    t.session.shutdown().await;
}

#[tokio::test]
async fn test_ws_unknown_command_gets_error_frame() {
    let t = test_app();
    let server = TestServer::builder().http_transport().build(t.app);
    let mut ws = server.get_websocket("/ws").await.into_websocket().await;
    receive_frame(&mut ws, "connection_response").await;

    ws.send_text(r#"{"type":"reboot"}"#).await;
    let frame = receive_frame(&mut ws, "error").await;
    assert!(frame["message"].as_str().unwrap().contains("unrecognized command"));
}
