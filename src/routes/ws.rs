// WebSocket live channel: snapshot fan-out plus start/stop/current commands

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::models::{ClientCommand, ServerMessage};
use crate::session::MonitorSession;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

type WsSender = SplitSink<WebSocket, Message>;

/// Decrements the session's client count on drop (connect = +1, drop = -1).
struct WsClientGuard(Arc<MonitorSession>);

impl Drop for WsClientGuard {
    fn drop(&mut self) {
        self.0.ws_clients().fetch_sub(1, Ordering::Relaxed);
    }
}

pub(super) async fn ws_monitor(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let session = state.session.clone();
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = stream_monitor(socket, session).await {
            tracing::info!("Monitor stream error: {}", e);
        }
    })
}

/// False when the frame could not be delivered (closed socket or send timeout).
async fn send_message(sender: &mut WsSender, message: &ServerMessage) -> anyhow::Result<bool> {
    let json = serde_json::to_string(message)?;
    let r = timeout(WS_SEND_TIMEOUT, sender.send(Message::Text(json.into()))).await;
    Ok(matches!(r, Ok(Ok(()))))
}

async fn handle_command(session: &Arc<MonitorSession>, text: &str) -> ServerMessage {
    match serde_json::from_str::<ClientCommand>(text) {
        Ok(ClientCommand::StartMonitoring) => {
            ServerMessage::monitoring_status(session.start().await)
        }
        Ok(ClientCommand::StopMonitoring) => ServerMessage::monitoring_status(session.stop().await),
        Ok(ClientCommand::GetCurrentData) => {
            ServerMessage::system_data(session.record_snapshot().await)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Unrecognized client command");
            ServerMessage::Error {
                message: format!("unrecognized command: {e}"),
            }
        }
    }
}

async fn stream_monitor(socket: WebSocket, session: Arc<MonitorSession>) -> anyhow::Result<()> {
    session.ws_clients().fetch_add(1, Ordering::Relaxed);
    let _guard = WsClientGuard(session.clone());
    tracing::info!("Client connected to monitor stream");

    let mut rx = session.subscribe();
    let (mut sender, mut receiver) = socket.split();

    let welcome = ServerMessage::ConnectionResponse {
        status: "connected".to_string(),
    };
    if !send_message(&mut sender, &welcome).await? {
        return Ok(());
    }

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        if !send_message(&mut sender, &ServerMessage::system_data(snapshot)).await? {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws client lagged, skipped {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let reply = handle_command(&session, text.as_str()).await;
                        if !send_message(&mut sender, &reply).await? {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "WebSocket receive failed");
                        break;
                    }
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, sender.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    tracing::info!("Client disconnected from monitor stream");
    Ok(())
}
