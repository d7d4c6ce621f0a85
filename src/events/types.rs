use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::events;
use crate::execution::ExecutionPolicy;
use crate::models::OperationAction;
use crate::reporting::BatchSummary;
use crate::state_machine::RecordState;

/// Lifecycle events emitted while a batch runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BatchEvent {
    BatchStarted {
        batch_id: Uuid,
        action: Option<OperationAction>,
        total: usize,
        policy: ExecutionPolicy,
    },
    RecordTransitioned {
        batch_id: Uuid,
        record_id: String,
        entity_id: String,
        from: RecordState,
        to: RecordState,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    BatchCompleted {
        batch_id: Uuid,
        summary: BatchSummary,
        cancelled: bool,
    },
}

impl BatchEvent {
    /// Dotted event name, e.g. `record.failed`
    pub fn name(&self) -> &'static str {
        match self {
            Self::BatchStarted { .. } => events::BATCH_STARTED,
            Self::RecordTransitioned { to, .. } => match to {
                RecordState::Completed => events::RECORD_COMPLETED,
                RecordState::Failed => events::RECORD_FAILED,
                RecordState::Pending | RecordState::Processing => events::RECORD_PROCESSING,
            },
            Self::BatchCompleted {
                cancelled: true, ..
            } => events::BATCH_CANCELLED,
            Self::BatchCompleted { .. } => events::BATCH_COMPLETED,
        }
    }

    pub fn batch_id(&self) -> Uuid {
        match self {
            Self::BatchStarted { batch_id, .. }
            | Self::RecordTransitioned { batch_id, .. }
            | Self::BatchCompleted { batch_id, .. } => *batch_id,
        }
    }
}
