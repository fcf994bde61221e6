// Background sampling loop: snapshot -> live subscribers -> history, once per interval.
// Exits when the session is deactivated (checked at the top of each tick) or on the shutdown signal.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use tokio::sync::oneshot;
use tokio::time::{Duration, Instant, MissedTickBehavior, interval};
use tracing::Instrument;

use crate::session::MonitorSession;

/// Rate limit for the "no receivers" message (avoid logging every tick when no client is connected)
const NO_RECEIVERS_WARN_INTERVAL: Duration = Duration::from_secs(60);

pub(crate) fn spawn(
    session: Arc<MonitorSession>,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    let sample_interval = session.sample_interval();
    let stats_log_interval = session.stats_log_interval();
    let worker_span = tracing::debug_span!(
        "worker",
        sample_interval_ms = sample_interval.as_millis() as u64
    );

    tokio::spawn(
        async move {
            let mut tick = interval(sample_interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut stats_log_tick = interval(stats_log_interval);
            stats_log_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut samples_recorded: u64 = 0;
            let mut last_no_receivers_warn: Option<Instant> = None;

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if !session.is_active() {
                            break;
                        }
                        let snapshot = session.take_snapshot().await;

                        if !session.publish(&snapshot) {
                            let should_warn = last_no_receivers_warn
                                .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_WARN_INTERVAL);
                            if should_warn {
                                tracing::debug!(
                                    operation = "broadcast_snapshot",
                                    "No active WebSocket clients; broadcast channel has no receivers"
                                );
                                last_no_receivers_warn = Some(Instant::now());
                            }
                        }
                        session.append(snapshot);
                        samples_recorded += 1;
                    }
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    _ = stats_log_tick.tick() => {
                        tracing::info!(
                            ws_clients = session.ws_clients().load(Ordering::Relaxed),
                            samples_recorded,
                            history_len = session.sample_count(),
                            "app stats"
                        );
                    }
                }
            }
            tracing::debug!(samples_recorded, "Worker shutting down");
        }
        .instrument(worker_span),
    )
}
