// Summary statistics and chart series over a history.
// Each metric charts one representative value per snapshot: sequence-valued families
// (sensors) use their first entry, or 0 when the sequence is empty.

use crate::models::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    CpuPercent,
    MemoryPercent,
    UploadKbps,
    DownloadKbps,
    CpuTemperature,
    GpuTemperature,
}

impl Metric {
    /// The metric's value in `snapshot`, or `None` if it is not a finite number.
    pub fn extract(self, snapshot: &Snapshot) -> Option<f64> {
        let value = match self {
            Metric::CpuPercent => snapshot.cpu.usage_percent,
            Metric::MemoryPercent => snapshot.memory.virtual_memory.usage_percent,
            Metric::UploadKbps => snapshot.network.speed.upload_kbps,
            Metric::DownloadKbps => snapshot.network.speed.download_kbps,
            Metric::CpuTemperature => snapshot
                .temperature
                .cpu_sensors
                .first()
                .map_or(0.0, |s| s.current_c),
            Metric::GpuTemperature => snapshot
                .temperature
                .gpu_sensors
                .first()
                .map_or(0.0, |g| g.temperature_c),
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// min/max/mean of `metric`; `None` when no snapshot yields a value (e.g. empty history).
pub fn summarize(history: &[Snapshot], metric: Metric) -> Option<Summary> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in history.iter().filter_map(|s| metric.extract(s)) {
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }
    if count == 0 {
        return None;
    }
    Some(Summary {
        min,
        max,
        mean: sum / count as f64,
    })
}

/// `(timestamp_ms, value)` pairs in history order; snapshots without a value are skipped.
pub fn series(history: &[Snapshot], metric: Metric) -> Vec<(u64, f64)> {
    history
        .iter()
        .filter_map(|s| metric.extract(s).map(|v| (s.timestamp, v)))
        .collect()
}
