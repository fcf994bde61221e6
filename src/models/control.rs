// Control surface and live-channel messages

use serde::{Deserialize, Serialize};

use super::Snapshot;

/// Outcome of a start/stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringStatus {
    Started,
    AlreadyRunning,
    Stopped,
    AlreadyStopped,
}

impl MonitoringStatus {
    pub fn message(self) -> &'static str {
        match self {
            MonitoringStatus::Started => "Monitoring started",
            MonitoringStatus::AlreadyRunning => "Monitoring already running",
            MonitoringStatus::Stopped => "Monitoring stopped",
            MonitoringStatus::AlreadyStopped => "Monitoring not running",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub monitoring_active: bool,
    pub data_count: usize,
}

/// Frames sent to `/ws` clients, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    ConnectionResponse {
        status: String,
    },
    SystemData {
        data: Box<Snapshot>,
    },
    MonitoringStatus {
        status: MonitoringStatus,
        message: String,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    pub fn system_data(snapshot: Snapshot) -> Self {
        ServerMessage::SystemData {
            data: Box::new(snapshot),
        }
    }

    pub fn monitoring_status(status: MonitoringStatus) -> Self {
        ServerMessage::MonitoringStatus {
            status,
            message: status.message().to_string(),
        }
    }
}

/// Commands accepted from `/ws` clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    StartMonitoring,
    StopMonitoring,
    GetCurrentData,
}
