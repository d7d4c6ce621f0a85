//! # System Constants
//!
//! Defaults and well-known names shared by the runner, configuration and
//! event layers.

/// Message recorded on a failed record when the remote error carries none
pub const FALLBACK_ERROR_MESSAGE: &str = "Operation failed";

/// Group size used by bulk issuance
pub const ISSUANCE_BATCH_SIZE: usize = 5;

/// Pause between issuance groups, in milliseconds
pub const ISSUANCE_INTER_GROUP_DELAY_MS: u64 = 1_000;

/// Per-action timeout applied when configuration does not override it
pub const DEFAULT_ACTION_TIMEOUT_MS: u64 = 30_000;

/// Capacity of the lifecycle event broadcast channel
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1_000;

/// Built-in action names
pub mod actions {
    pub const REVOKE: &str = "revoke";
    pub const DOWNLOAD: &str = "download";
    pub const DELETE: &str = "delete";
    pub const ISSUE: &str = "issue";
}

/// Lifecycle event names, used as log targets for published events
pub mod events {
    pub const BATCH_STARTED: &str = "batch.started";
    pub const BATCH_COMPLETED: &str = "batch.completed";
    pub const BATCH_CANCELLED: &str = "batch.cancelled";
    pub const RECORD_PROCESSING: &str = "record.processing";
    pub const RECORD_COMPLETED: &str = "record.completed";
    pub const RECORD_FAILED: &str = "record.failed";
}
