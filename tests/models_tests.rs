// Model serialization and derived-field tests

mod common;

use common::{GIB, minimal_snapshot};
use resmon::models::*;

#[test]
fn test_snapshot_serialization_camel_case() {
    let json = serde_json::to_value(minimal_snapshot(42)).unwrap();
    assert_eq!(json["timestamp"], 42);
    assert!(json["cpu"].get("usagePercent").is_some());
    assert!(json["cpu"].get("perCorePercent").is_some());
    assert!(json["memory"].get("virtual").is_some());
    assert!(json["memory"]["swap"].get("usedGb").is_some());
    assert!(json["network"]["speed"].get("uploadKbps").is_some());
    assert!(json["temperature"].get("cpuSensors").is_some());
    let back: Snapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back.timestamp, 42);
}

#[test]
fn test_virtual_memory_derived_fields() {
    let mem = VirtualMemory::from_bytes(8 * GIB, 2 * GIB, 6 * GIB);
    assert_eq!(mem.usage_percent, 25.0);
    assert_eq!(mem.total_gb, 8.0);
    assert_eq!(mem.used_gb, 2.0);
    assert_eq!(mem.available_gb, 6.0);
}

#[test]
fn test_zero_totals_give_zero_percent() {
    assert_eq!(VirtualMemory::from_bytes(0, 0, 0).usage_percent, 0.0);
    assert_eq!(SwapMemory::from_bytes(0, 0).usage_percent, 0.0);
    let p = PartitionStat::new("d".into(), "/".into(), "ext4".into(), 0, 0);
    assert_eq!(p.usage_percent, 0.0);
    assert_eq!(percent_of(10.0, 0.0), 0.0);
}

#[test]
fn test_percent_is_clamped() {
    assert_eq!(percent_of(150.0, 100.0), 100.0);
    assert_eq!(percent_of(-5.0, 100.0), 0.0);
}

#[test]
fn test_network_speed_units() {
    let speed = NetworkSpeed::from_bytes_per_sec(1024.0 * 1024.0, 512.0);
    assert_eq!(speed.upload_kbps, 1024.0);
    assert_eq!(speed.upload_mbps, 8.0);
    assert_eq!(speed.download_kbps, 0.5);
}

#[test]
fn test_network_totals_from_counters() {
    let totals: NetworkTotals = NetworkCounters {
        bytes_sent: 5 * 1024 * 1024,
        bytes_recv: 1024 * 1024,
        packets_sent: 10,
        packets_recv: 20,
    }
    .into();
    assert_eq!(totals.mb_sent, 5.0);
    assert_eq!(totals.mb_recv, 1.0);
    assert_eq!(totals.packets_recv, 20);
}

#[test]
fn test_missing_sensors_become_sentinels() {
    let temps = TemperatureStats::new(vec![], vec![]);
    assert_eq!(temps.cpu_sensors.len(), 1);
    assert_eq!(temps.cpu_sensors[0].label, NOT_AVAILABLE);
    assert_eq!(temps.cpu_sensors[0].current_c, 0.0);
    assert_eq!(temps.gpu_sensors.len(), 1);
    assert_eq!(temps.gpu_sensors[0].name, NOT_AVAILABLE);
    assert_eq!(temps.gpu_sensors[0].temperature_c, 0.0);
}

#[test]
fn test_gpu_memory_percent() {
    let gpu = GpuSensor::new(0, "gpu0".into(), 60.0, 130.0, 2048.0, 8192.0);
    assert_eq!(gpu.memory_percent, 25.0);
    assert_eq!(gpu.load_percent, 100.0);
    let idle = GpuSensor::new(1, "gpu1".into(), 30.0, 0.0, 0.0, 0.0);
    assert_eq!(idle.memory_percent, 0.0);
}

#[test]
fn test_server_message_wire_format() {
    let started = serde_json::to_value(ServerMessage::monitoring_status(
        MonitoringStatus::Started,
    ))
    .unwrap();
    assert_eq!(
        started,
        serde_json::json!({"type": "monitoring_status", "status": "started", "message": "Monitoring started"})
    );

    let stopped = serde_json::to_value(ServerMessage::monitoring_status(
        MonitoringStatus::AlreadyStopped,
    ))
    .unwrap();
    assert_eq!(stopped["status"], "already_stopped");
    assert_eq!(stopped["message"], "Monitoring not running");

    let data = serde_json::to_value(ServerMessage::system_data(minimal_snapshot(7))).unwrap();
    assert_eq!(data["type"], "system_data");
    assert_eq!(data["data"]["timestamp"], 7);
}

#[test]
fn test_client_command_parsing() {
    let cmd: ClientCommand = serde_json::from_str(r#"{"type":"start_monitoring"}"#).unwrap();
    assert_eq!(cmd, ClientCommand::StartMonitoring);
    let cmd: ClientCommand = serde_json::from_str(r#"{"type":"get_current_data"}"#).unwrap();
    assert_eq!(cmd, ClientCommand::GetCurrentData);
    assert!(serde_json::from_str::<ClientCommand>(r#"{"type":"reboot"}"#).is_err());
}

#[test]
fn test_status_response_camel_case() {
    let json = serde_json::to_value(StatusResponse {
        monitoring_active: true,
        data_count: 3,
    })
    .unwrap();
    assert_eq!(json, serde_json::json!({"monitoringActive": true, "dataCount": 3}));
}
