// In-memory snapshot history for one monitoring session. Unbounded.

use crate::models::Snapshot;

#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends in arrival order. A timestamp older than the last one (wall clock stepped
    /// back) is raised to it so timestamps never decrease.
    pub fn append(&mut self, mut snapshot: Snapshot) {
        if let Some(last) = self.snapshots.last()
            && snapshot.timestamp < last.timestamp
        {
            tracing::debug!(
                timestamp = snapshot.timestamp,
                last_timestamp = last.timestamp,
                "clock went backwards; clamping snapshot timestamp"
            );
            snapshot.timestamp = last.timestamp;
        }
        self.snapshots.push(snapshot);
    }

    pub fn all(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
