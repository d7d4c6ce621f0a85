use crate::models::OperationRecord;

/// Receives the batch's records after every status transition
///
/// The slice is a read-only view; observers that need to keep it must copy.
/// Any `Fn(&[OperationRecord]) + Send + Sync` closure is an observer.
pub trait BatchObserver: Send + Sync {
    fn on_update(&self, records: &[OperationRecord]);
}

impl<F> BatchObserver for F
where
    F: Fn(&[OperationRecord]) + Send + Sync,
{
    fn on_update(&self, records: &[OperationRecord]) {
        self(records)
    }
}
