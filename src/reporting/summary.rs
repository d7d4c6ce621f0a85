use serde::{Deserialize, Serialize};

use crate::models::OperationRecord;
use crate::state_machine::RecordState;

/// Aggregate outcome counts for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// True once every record has settled
    ///
    /// A summary taken mid-run, or after a cancelled run, reports partial
    /// counts and must not be presented as final.
    pub fn is_final(&self) -> bool {
        self.succeeded + self.failed == self.total
    }

    /// Records that have not reached a terminal state
    pub fn unattempted(&self) -> usize {
        self.total.saturating_sub(self.succeeded + self.failed)
    }

    pub fn all_succeeded(&self) -> bool {
        self.is_final() && self.failed == 0
    }
}

/// Count records by outcome
pub fn summarize(records: &[OperationRecord]) -> BatchSummary {
    records.iter().fold(
        BatchSummary {
            total: records.len(),
            ..BatchSummary::default()
        },
        |mut summary, record| {
            match record.status {
                RecordState::Completed => summary.succeeded += 1,
                RecordState::Failed => summary.failed += 1,
                RecordState::Pending | RecordState::Processing => {}
            }
            summary
        },
    )
}
