use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::execution::BatchObserver;
use crate::models::OperationRecord;
use crate::state_machine::RecordState;

/// Live progress of a batch, counted by record status
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl ProgressSnapshot {
    pub fn from_records(records: &[OperationRecord]) -> Self {
        let mut snapshot = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            match record.status {
                RecordState::Pending => snapshot.pending += 1,
                RecordState::Processing => snapshot.processing += 1,
                RecordState::Completed => snapshot.completed += 1,
                RecordState::Failed => snapshot.failed += 1,
            }
        }
        snapshot
    }

    pub fn settled(&self) -> usize {
        self.completed + self.failed
    }

    /// `settled / total * 100`; zero for an empty batch
    pub fn percent_complete(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.settled() as f64 / self.total as f64 * 100.0
    }

    pub fn is_settled(&self) -> bool {
        self.settled() == self.total
    }
}

/// Observer that keeps the latest published records for a progress view
///
/// Cloning shares the same underlying state, so one handle can be given to the
/// runner while another is read by the host.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    latest: Arc<RwLock<Vec<OperationRecord>>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::from_records(&self.latest.read())
    }

    /// Read-only copy of the most recently published records
    pub fn records(&self) -> Vec<OperationRecord> {
        self.latest.read().clone()
    }

    /// Failed records with their messages, for a per-item failure list
    pub fn failures(&self) -> Vec<(String, String)> {
        self.latest
            .read()
            .iter()
            .filter(|record| record.status == RecordState::Failed)
            .map(|record| {
                (
                    record.entity_id.clone(),
                    record.error.clone().unwrap_or_default(),
                )
            })
            .collect()
    }
}

impl BatchObserver for ProgressTracker {
    fn on_update(&self, records: &[OperationRecord]) {
        let mut latest = self.latest.write();
        latest.clear();
        latest.extend_from_slice(records);
    }
}
