// Snapshot schema shared by probes, history, live channel and report

mod control;
mod network;
mod storage;
mod system;
mod thermal;

pub use control::{ClientCommand, MonitoringStatus, ServerMessage, StatusResponse};
pub use network::{
    InterfaceAddress, InterfaceStat, NetworkCounters, NetworkSpeed, NetworkStats, NetworkTotals,
};
pub use storage::{DiskIoStats, DiskStats, PartitionStat};
pub use system::{CpuFrequency, CpuStats, MemoryStats, Snapshot, SwapMemory, VirtualMemory};
pub use thermal::{CpuSensor, GpuSensor, NOT_AVAILABLE, TemperatureStats};

const BYTES_PER_KB: f64 = 1024.0;
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Rounds to 2 decimals, the precision of every scaled field on the wire.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn bytes_to_kb(bytes: f64) -> f64 {
    round2(bytes / BYTES_PER_KB)
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB)
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB)
}

/// `part / whole * 100`, clamped to [0, 100]; 0 when `whole` is 0.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
