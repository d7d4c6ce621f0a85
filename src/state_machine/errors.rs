use thiserror::Error;

use super::states::RecordState;

/// Error types for record state machine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateMachineError {
    #[error("Invalid state transition for record {record_id}: {event} from {from}")]
    InvalidTransition {
        record_id: String,
        from: RecordState,
        event: String,
    },
}

/// Result type alias for state machine operations
pub type StateMachineResult<T> = Result<T, StateMachineError>;
