// Monitoring session: owns History, the snapshot assembler and the sampling loop lifecycle.
// Constructed once in main and shared with handlers through axum state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;

use crate::assembler::SnapshotAssembler;
use crate::history::History;
use crate::models::{MonitoringStatus, Snapshot, StatusResponse};
use crate::probes::Probes;
use crate::worker;

/// Fixed sampling cadence; also the nominal interval used for report durations.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(10);

struct WorkerHandle {
    handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

pub struct MonitorSession {
    assembler: Arc<SnapshotAssembler>,
    history: Mutex<History>,
    active: AtomicBool,
    tx: broadcast::Sender<Snapshot>,
    /// Serializes start/stop transitions.
    worker: tokio::sync::Mutex<Option<WorkerHandle>>,
    ws_clients: AtomicUsize,
    sample_interval: Duration,
    stats_log_interval: Duration,
}

impl MonitorSession {
    pub fn new(
        probes: Arc<dyn Probes>,
        broadcast_capacity: usize,
        stats_log_interval: Duration,
    ) -> Self {
        let (tx, _) = broadcast::channel(broadcast_capacity);
        Self {
            assembler: Arc::new(SnapshotAssembler::new(probes)),
            history: Mutex::new(History::new()),
            active: AtomicBool::new(false),
            tx,
            worker: tokio::sync::Mutex::new(None),
            ws_clients: AtomicUsize::new(0),
            sample_interval: SAMPLE_INTERVAL,
            stats_log_interval,
        }
    }

    /// Overrides the sampling cadence (tests drive the loop faster than 10 s).
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    pub(crate) fn stats_log_interval(&self) -> Duration {
        self.stats_log_interval
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    pub fn ws_clients(&self) -> &AtomicUsize {
        &self.ws_clients
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            monitoring_active: self.is_active(),
            data_count: self.sample_count(),
        }
    }

    pub fn sample_count(&self) -> usize {
        self.lock_history().len()
    }

    /// Frozen copy of the history; later appends are not visible in it.
    pub fn history(&self) -> Vec<Snapshot> {
        self.lock_history().all().to_vec()
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.lock_history().latest().cloned()
    }

    pub fn clear_history(&self) {
        self.lock_history().clear();
    }

    /// Takes a fresh snapshot and appends it to the history ("get current data").
    pub async fn record_snapshot(&self) -> Snapshot {
        let snapshot = self.take_snapshot().await;
        self.append(snapshot.clone());
        snapshot
    }

    pub(crate) async fn take_snapshot(&self) -> Snapshot {
        self.assembler.take_snapshot().await
    }

    pub(crate) fn append(&self, snapshot: Snapshot) {
        self.lock_history().append(snapshot);
    }

    /// Sends to live subscribers; false when nobody is listening.
    pub(crate) fn publish(&self, snapshot: &Snapshot) -> bool {
        self.tx.send(snapshot.clone()).is_ok()
    }

    /// Clears the history and spawns the sampling loop. No-op while already active.
    pub async fn start(self: &Arc<Self>) -> MonitoringStatus {
        let mut worker = self.worker.lock().await;
        if self.is_active() {
            return MonitoringStatus::AlreadyRunning;
        }
        // A stopped loop may still be finishing its last tick; let it land before clearing.
        if let Some(previous) = worker.take()
            && let Err(e) = previous.handle.await
        {
            tracing::warn!(error = %e, operation = "join_worker", "previous sampling loop failed");
        }
        self.clear_history();
        self.active.store(true, Ordering::SeqCst);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        *worker = Some(WorkerHandle {
            handle: worker::spawn(self.clone(), shutdown_rx),
            shutdown_tx: Some(shutdown_tx),
        });
        tracing::info!("Monitoring started");
        MonitoringStatus::Started
    }

    /// Signals the sampling loop to exit; an in-flight tick still completes.
    pub async fn stop(&self) -> MonitoringStatus {
        let mut worker = self.worker.lock().await;
        if !self.active.swap(false, Ordering::SeqCst) {
            return MonitoringStatus::AlreadyStopped;
        }
        if let Some(w) = worker.as_mut()
            && let Some(tx) = w.shutdown_tx.take()
        {
            let _ = tx.send(());
        }
        tracing::info!("Monitoring stopped");
        MonitoringStatus::Stopped
    }

    /// Stops monitoring and waits for the sampling loop to exit.
    pub async fn shutdown(&self) {
        self.stop().await;
        let previous = self.worker.lock().await.take();
        if let Some(w) = previous
            && let Err(e) = w.handle.await
        {
            tracing::warn!(error = %e, operation = "join_worker", "sampling loop failed");
        }
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
