// Disk partition and IO models

use serde::{Deserialize, Serialize};

use super::{bytes_to_gb, bytes_to_mb, percent_of};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionStat {
    pub device: String,
    pub mountpoint: String,
    pub filesystem: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub usage_percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
}

impl PartitionStat {
    /// Used space is derived as `total - free`.
    pub fn new(device: String, mountpoint: String, filesystem: String, total: u64, free: u64) -> Self {
        let used = total.saturating_sub(free);
        Self {
            device,
            mountpoint,
            filesystem,
            total,
            used,
            free,
            usage_percent: percent_of(used as f64, total as f64),
            total_gb: bytes_to_gb(total),
            used_gb: bytes_to_gb(used),
            free_gb: bytes_to_gb(free),
        }
    }
}

/// Cumulative IO counters summed over all block devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskIoStats {
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub read_mb: f64,
    pub write_mb: f64,
}

impl DiskIoStats {
    pub fn from_counters(read_bytes: u64, write_bytes: u64) -> Self {
        Self {
            read_bytes,
            write_bytes,
            read_mb: bytes_to_mb(read_bytes),
            write_mb: bytes_to_mb(write_bytes),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskStats {
    pub partitions: Vec<PartitionStat>,
    pub io: DiskIoStats,
}
