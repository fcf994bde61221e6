// CPU, memory and the full snapshot record

use serde::{Deserialize, Serialize};

use super::{DiskStats, NetworkStats, TemperatureStats, bytes_to_gb, percent_of};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuFrequency {
    pub current_mhz: f64,
    pub min_mhz: f64,
    pub max_mhz: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStats {
    pub usage_percent: f64,
    pub per_core_percent: Vec<f64>,
    pub physical_cores: u32,
    pub logical_cores: u32,
    pub frequency: CpuFrequency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMemory {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub usage_percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
    pub available_gb: f64,
}

impl VirtualMemory {
    pub fn from_bytes(total: u64, used: u64, available: u64) -> Self {
        Self {
            total,
            used,
            available,
            usage_percent: percent_of(used as f64, total as f64),
            total_gb: bytes_to_gb(total),
            used_gb: bytes_to_gb(used),
            available_gb: bytes_to_gb(available),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapMemory {
    pub total: u64,
    pub used: u64,
    pub usage_percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
}

impl SwapMemory {
    pub fn from_bytes(total: u64, used: u64) -> Self {
        Self {
            total,
            used,
            usage_percent: percent_of(used as f64, total as f64),
            total_gb: bytes_to_gb(total),
            used_gb: bytes_to_gb(used),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    #[serde(rename = "virtual")]
    pub virtual_memory: VirtualMemory,
    pub swap: SwapMemory,
}

/// One reading of every metric family. `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp: u64,
    pub cpu: CpuStats,
    pub memory: MemoryStats,
    pub disk: DiskStats,
    pub network: NetworkStats,
    pub temperature: TemperatureStats,
}
