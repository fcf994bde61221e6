// Shared test helpers
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use resmon::assembler::empty_snapshot;
use resmon::models::*;
use resmon::probes::{NetworkReading, Probes};

pub const GIB: u64 = 1024 * 1024 * 1024;

pub fn minimal_snapshot(timestamp: u64) -> Snapshot {
    empty_snapshot(timestamp)
}

/// Snapshot with the fields the report reads filled in.
pub fn sample_snapshot(timestamp: u64, cpu: f64, memory: f64, upload_kbps: f64) -> Snapshot {
    let mut s = empty_snapshot(timestamp);
    s.cpu.usage_percent = cpu;
    s.cpu.physical_cores = 4;
    s.cpu.logical_cores = 8;
    s.memory.virtual_memory.usage_percent = memory;
    s.memory.virtual_memory.used_gb = 4.0;
    s.memory.virtual_memory.total_gb = 16.0;
    s.network.speed = NetworkSpeed::from_bytes_per_sec(upload_kbps * 1024.0, 2048.0);
    s.network.totals.mb_sent = 12.5;
    s.network.totals.mb_recv = 40.25;
    s
}

/// Deterministic probes: CPU usage follows a script (0 once exhausted), every
/// network read adds 1024 bytes sent and 2048 received.
pub struct FakeProbes {
    cpu_script: Mutex<VecDeque<f64>>,
    bytes_sent: AtomicU64,
    bytes_recv: AtomicU64,
    fail_disk: bool,
    cpu_temperature: f64,
}

impl FakeProbes {
    pub fn new() -> Self {
        Self::with_cpu(&[])
    }

    pub fn with_cpu(values: &[f64]) -> Self {
        Self {
            cpu_script: Mutex::new(values.iter().copied().collect()),
            bytes_sent: AtomicU64::new(0),
            bytes_recv: AtomicU64::new(0),
            fail_disk: false,
            cpu_temperature: 45.0,
        }
    }

    pub fn failing_disk(mut self) -> Self {
        self.fail_disk = true;
        self
    }

    pub fn without_temperature(mut self) -> Self {
        self.cpu_temperature = 0.0;
        self
    }
}

impl Probes for FakeProbes {
    fn cpu(&self) -> anyhow::Result<CpuStats> {
        let usage = self.cpu_script.lock().unwrap().pop_front().unwrap_or(0.0);
        Ok(CpuStats {
            usage_percent: usage,
            per_core_percent: vec![usage; 2],
            physical_cores: 2,
            logical_cores: 4,
            frequency: CpuFrequency {
                current_mhz: 2400.0,
                min_mhz: 800.0,
                max_mhz: 3600.0,
            },
        })
    }

    fn memory(&self) -> anyhow::Result<MemoryStats> {
        Ok(MemoryStats {
            virtual_memory: VirtualMemory::from_bytes(8 * GIB, 2 * GIB, 6 * GIB),
            swap: SwapMemory::from_bytes(2 * GIB, 0),
        })
    }

    fn disk(&self) -> anyhow::Result<DiskStats> {
        if self.fail_disk {
            anyhow::bail!("disk probe unavailable");
        }
        Ok(DiskStats {
            partitions: vec![PartitionStat::new(
                "/dev/sda1".into(),
                "/".into(),
                "ext4".into(),
                100 * GIB,
                75 * GIB,
            )],
            io: DiskIoStats::from_counters(0, 0),
        })
    }

    fn network(&self) -> anyhow::Result<NetworkReading> {
        let sent = self.bytes_sent.fetch_add(1024, Ordering::SeqCst) + 1024;
        let recv = self.bytes_recv.fetch_add(2048, Ordering::SeqCst) + 2048;
        Ok(NetworkReading {
            counters: NetworkCounters {
                bytes_sent: sent,
                bytes_recv: recv,
                packets_sent: sent / 64,
                packets_recv: recv / 64,
            },
            interfaces: vec![],
        })
    }

    fn temperature(&self) -> TemperatureStats {
        let cpu = if self.cpu_temperature > 0.0 {
            vec![CpuSensor {
                label: "Package id 0".into(),
                current_c: self.cpu_temperature,
                high_c: Some(80.0),
                critical_c: Some(100.0),
            }]
        } else {
            vec![]
        };
        TemperatureStats::new(cpu, vec![])
    }
}
