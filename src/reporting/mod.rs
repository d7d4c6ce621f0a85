//! # Reporting
//!
//! Aggregation over a batch's records: the final summary shown to the user and
//! the live progress view consumed while a batch runs.

pub mod progress;
pub mod summary;

pub use progress::{ProgressSnapshot, ProgressTracker};
pub use summary::{summarize, BatchSummary};
