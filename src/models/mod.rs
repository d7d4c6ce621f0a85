//! # Models
//!
//! Serializable batch state: operation records and the batch that owns them.

pub mod batch;
pub mod operation_record;

pub use batch::Batch;
pub use operation_record::{OperationAction, OperationRecord};
