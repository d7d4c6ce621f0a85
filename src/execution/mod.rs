//! # Execution
//!
//! Drives batches of operation records against a remote action client.
//!
//! - [`ExecutionPolicy`] decides how many records are in flight at once
//! - [`RemoteActionClient`] performs one action against one entity
//! - [`BatchRunner`] walks the records through their state machine, isolates
//!   per-record failures and notifies [`BatchObserver`]s on every transition

pub mod action_client;
pub mod batch_runner;
pub mod observer;
pub mod policy;

pub use action_client::{
    action_fn, ActionError, ActionRequest, ActionResult, FnActionClient, RemoteActionClient,
};
pub use batch_runner::BatchRunner;
pub use observer::BatchObserver;
pub use policy::ExecutionPolicy;
