#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Bulk Runner
//!
//! Bulk operation runner for credential wallet and administration consoles.
//!
//! ## Overview
//!
//! A console lets a user select many credentials (or issuance recipients) and
//! apply one action to all of them: revoke, issue, download, delete. This crate
//! owns the part of that flow that is easy to get wrong in every UI handler:
//! tracking each entity through `pending → processing → completed | failed`,
//! bounding how many remote calls are in flight, keeping one entity's failure
//! from aborting the rest, and reducing the outcome to a summary.
//!
//! The remote calls themselves are injected through [`RemoteActionClient`];
//! transport, credential verification and revocation registries are the
//! client's concern.
//!
//! ## Module Organization
//!
//! - [`models`] - Operation records and batches
//! - [`state_machine`] - Record state transitions
//! - [`execution`] - Execution policies, the remote action seam and the runner
//! - [`reporting`] - Batch summaries and live progress
//! - [`events`] - Broadcast lifecycle events
//! - [`config`] - Layered configuration
//! - [`error`] - Batch-level errors
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bulk_runner::{action_fn, Batch, BatchRunner, ExecutionPolicy, OperationAction};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut batch = Batch::for_action(
//!     OperationAction::Revoke,
//!     ["urn:uuid:a", "urn:uuid:b"],
//!     ExecutionPolicy::revocation(),
//! )?
//! .with_params(json!({ "reason": "key compromise" }));
//!
//! let runner = BatchRunner::new(action_fn(|request| async move {
//!     // call the revocation endpoint for request.entity_id here
//!     Ok(Some(json!({ "revoked": request.entity_id })))
//! }));
//!
//! let summary = runner.run(&mut batch).await?;
//! println!("{} revoked, {} failed", summary.succeeded, summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod execution;
pub mod logging;
pub mod models;
pub mod reporting;
pub mod state_machine;

pub use config::{ConfigManager, ConfigurationError, RunnerConfig};
pub use error::{BulkError, Result};
pub use events::{BatchEvent, EventPublisher};
pub use execution::{
    action_fn, ActionError, ActionRequest, ActionResult, BatchObserver, BatchRunner,
    ExecutionPolicy, RemoteActionClient,
};
pub use models::{Batch, OperationAction, OperationRecord};
pub use reporting::{summarize, BatchSummary, ProgressSnapshot, ProgressTracker};
pub use state_machine::{RecordEvent, RecordState, StateMachineError};
