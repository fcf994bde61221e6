// Combines probe readings into one Snapshot. Never fails: a failed probe becomes a zero reading.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use crate::models::*;
use crate::probes::Probes;
use crate::rate_tracker::RateTracker;

pub struct SnapshotAssembler {
    probes: Arc<dyn Probes>,
    rate_tracker: Mutex<RateTracker>,
}

impl SnapshotAssembler {
    /// Seeds the rate tracker with an initial counter read so the first snapshot
    /// reports throughput since construction.
    pub fn new(probes: Arc<dyn Probes>) -> Self {
        let initial = match probes.network() {
            Ok(reading) => reading.counters,
            Err(e) => {
                tracing::warn!(error = %e, operation = "initial_network_read", "network counters unavailable");
                NetworkCounters::default()
            }
        };
        Self {
            probes,
            rate_tracker: Mutex::new(RateTracker::new(initial, Instant::now())),
        }
    }

    /// Reads every probe on the blocking pool and returns the composed snapshot.
    pub async fn take_snapshot(self: &Arc<Self>) -> Snapshot {
        let timestamp = now_millis();
        let assembler = self.clone();
        match tokio::task::spawn_blocking(move || assembler.assemble(timestamp)).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, operation = "take_snapshot", "probe task failed");
                empty_snapshot(timestamp)
            }
        }
    }

    /// Blocking; runs the CPU sample window.
    pub fn assemble(&self, timestamp: u64) -> Snapshot {
        let cpu = fallback(self.probes.cpu(), "cpu");
        let memory = fallback(self.probes.memory(), "memory");
        let disk = fallback(self.probes.disk(), "disk");
        let network = self.network_stats();
        let temperature = self.probes.temperature();

        Snapshot {
            timestamp,
            cpu,
            memory,
            disk,
            network,
            temperature,
        }
    }

    /// The tracker stays locked across the counter read so concurrent snapshots
    /// update it in the order their counters were read.
    fn network_stats(&self) -> NetworkStats {
        let mut tracker = self
            .rate_tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match self.probes.network() {
            Ok(reading) => {
                let speed = tracker.compute_network_speed(reading.counters, Instant::now());
                NetworkStats {
                    totals: reading.counters.into(),
                    speed,
                    interfaces: reading.interfaces,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, operation = "network", "probe failed; using zero reading");
                NetworkStats {
                    totals: tracker.last_counters().into(),
                    ..Default::default()
                }
            }
        }
    }
}

fn fallback<T: Default>(result: anyhow::Result<T>, probe: &'static str) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, operation = probe, "probe failed; using zero reading");
        T::default()
    })
}

/// Snapshot with every family at its zero/sentinel value.
pub fn empty_snapshot(timestamp: u64) -> Snapshot {
    Snapshot {
        timestamp,
        cpu: CpuStats::default(),
        memory: MemoryStats::default(),
        disk: DiskStats::default(),
        network: NetworkStats::default(),
        temperature: TemperatureStats::default(),
    }
}

pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
            0
        })
}
