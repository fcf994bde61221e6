// Network counters, derived throughput and interface models

use serde::{Deserialize, Serialize};

use super::{bytes_to_kb, bytes_to_mb, round2};

/// Raw cumulative counters summed over all interfaces; input of the rate tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkCounters {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTotals {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub mb_sent: f64,
    pub mb_recv: f64,
}

impl From<NetworkCounters> for NetworkTotals {
    fn from(c: NetworkCounters) -> Self {
        Self {
            bytes_sent: c.bytes_sent,
            bytes_recv: c.bytes_recv,
            packets_sent: c.packets_sent,
            packets_recv: c.packets_recv,
            mb_sent: bytes_to_mb(c.bytes_sent),
            mb_recv: bytes_to_mb(c.bytes_recv),
        }
    }
}

/// Throughput since the previous snapshot. Negative after a counter reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpeed {
    pub upload_bytes_per_sec: f64,
    pub download_bytes_per_sec: f64,
    /// KiB/s
    pub upload_kbps: f64,
    pub download_kbps: f64,
    /// Mibit/s
    pub upload_mbps: f64,
    pub download_mbps: f64,
}

impl NetworkSpeed {
    pub fn from_bytes_per_sec(upload: f64, download: f64) -> Self {
        Self {
            upload_bytes_per_sec: upload,
            download_bytes_per_sec: download,
            upload_kbps: bytes_to_kb(upload),
            download_kbps: bytes_to_kb(download),
            upload_mbps: round2(upload * 8.0 / (1024.0 * 1024.0)),
            download_mbps: round2(download * 8.0 / (1024.0 * 1024.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceAddress {
    pub address: String,
    /// "IPv4", "IPv6" or "MAC"
    pub family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceStat {
    pub name: String,
    pub is_up: bool,
    /// Link speed in Mbit/s, 0 when unknown.
    pub link_speed_mbps: u64,
    pub mac_address: String,
    pub addresses: Vec<InterfaceAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub totals: NetworkTotals,
    pub speed: NetworkSpeed,
    pub interfaces: Vec<InterfaceStat>,
}
