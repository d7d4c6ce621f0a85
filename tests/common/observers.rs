use bulk_runner::{BatchObserver, OperationRecord, RecordState};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Observer recording every published snapshot and each record's distinct
/// status sequence
#[derive(Debug, Clone, Default)]
pub struct StatusHistory {
    snapshots: Arc<Mutex<Vec<Vec<OperationRecord>>>>,
    statuses: Arc<Mutex<HashMap<String, Vec<RecordState>>>>,
}

impl StatusHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<Vec<OperationRecord>> {
        self.snapshots.lock().clone()
    }

    pub fn update_count(&self) -> usize {
        self.snapshots.lock().len()
    }

    pub fn statuses_of(&self, record_id: &str) -> Vec<RecordState> {
        self.statuses
            .lock()
            .get(record_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Every record's observed sequence is a subsequence of
    /// pending, processing, terminal, and never reaches a terminal state
    /// without passing through processing
    pub fn assert_monotonic(&self) {
        for (record_id, statuses) in self.statuses.lock().iter() {
            let ranks: Vec<u8> = statuses.iter().map(|status| rank(*status)).collect();
            assert!(
                ranks.windows(2).all(|pair| pair[0] < pair[1]),
                "{record_id} regressed or repeated: {statuses:?}"
            );
            assert!(
                statuses.iter().filter(|s| s.is_terminal()).count() <= 1,
                "{record_id} reached two terminal states: {statuses:?}"
            );
            if let Some(position) = statuses.iter().position(|s| s.is_terminal()) {
                assert!(
                    position > 0 && statuses[position - 1] == RecordState::Processing,
                    "{record_id} skipped processing: {statuses:?}"
                );
            }
        }
    }
}

fn rank(status: RecordState) -> u8 {
    match status {
        RecordState::Pending => 0,
        RecordState::Processing => 1,
        RecordState::Completed | RecordState::Failed => 2,
    }
}

impl BatchObserver for StatusHistory {
    fn on_update(&self, records: &[OperationRecord]) {
        self.snapshots.lock().push(records.to_vec());

        let mut statuses = self.statuses.lock();
        for record in records {
            let history = statuses.entry(record.id.clone()).or_default();
            if history.last() != Some(&record.status) {
                history.push(record.status);
            }
        }
    }
}
