// Network throughput from successive cumulative counter readings

use std::time::Instant;

use crate::models::{NetworkCounters, NetworkSpeed};

/// Last observed counters and when they were read.
#[derive(Debug, Clone)]
pub struct RateTracker {
    last_counters: NetworkCounters,
    last_instant: Instant,
}

impl RateTracker {
    pub fn new(initial: NetworkCounters, at: Instant) -> Self {
        Self {
            last_counters: initial,
            last_instant: at,
        }
    }

    /// Bytes/sec sent and received since the previous call, then stores `current` as the
    /// new baseline. Zero elapsed time (or a `now` earlier than the baseline) yields (0, 0).
    /// A counter that went backwards (wrap, interface reset) yields a negative rate.
    pub fn compute_network_speed(&mut self, current: NetworkCounters, now: Instant) -> NetworkSpeed {
        let dt_secs = now
            .checked_duration_since(self.last_instant)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        let (upload, download) = if dt_secs > 0.0 {
            let sent = current.bytes_sent as f64 - self.last_counters.bytes_sent as f64;
            let recv = current.bytes_recv as f64 - self.last_counters.bytes_recv as f64;
            (sent / dt_secs, recv / dt_secs)
        } else {
            (0.0, 0.0)
        };

        self.last_counters = current;
        self.last_instant = now;
        NetworkSpeed::from_bytes_per_sec(upload, download)
    }

    pub fn last_counters(&self) -> NetworkCounters {
        self.last_counters
    }
}
