use thiserror::Error;

use crate::config::ConfigurationError;
use crate::state_machine::RecordState;

/// Batch-level errors
///
/// Per-record action failures never surface here; they are recorded on the
/// record itself and counted in the summary.
#[derive(Error, Debug)]
pub enum BulkError {
    #[error("Batch precondition failed: at least one record is required")]
    EmptyBatch,

    #[error("Duplicate record for action '{action}' and entity '{entity_id}'")]
    DuplicateRecord { action: String, entity_id: String },

    #[error("Duplicate record id '{record_id}' in batch")]
    DuplicateRecordId { record_id: String },

    #[error("Record {record_id} is not fresh: {reason}")]
    InvalidRecord { record_id: String, reason: String },

    #[error("Invalid execution policy: {0}")]
    InvalidPolicy(String),

    #[error("Action timeout must be greater than zero")]
    InvalidTimeout,

    #[error("Record {record_id} must be pending to run, found {status}")]
    RecordNotPending {
        record_id: String,
        status: RecordState,
    },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl BulkError {
    /// Check if this error is a caller precondition failure
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::EmptyBatch
                | Self::DuplicateRecord { .. }
                | Self::DuplicateRecordId { .. }
                | Self::InvalidRecord { .. }
                | Self::InvalidPolicy(_)
                | Self::InvalidTimeout
                | Self::RecordNotPending { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BulkError>;
