//! # Batch
//!
//! The records submitted together for one bulk action, along with the policy
//! they run under. Owned by the caller; the runner borrows it while running.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

use super::operation_record::{OperationAction, OperationRecord};
use crate::error::{BulkError, Result};
use crate::execution::ExecutionPolicy;
use crate::reporting::{summarize, BatchSummary, ProgressSnapshot};
use crate::state_machine::RecordState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: Uuid,
    records: Vec<OperationRecord>,
    pub policy: ExecutionPolicy,
    /// Forwarded with every action, e.g. `{"reason": "key compromise"}`
    #[serde(default)]
    pub params: Value,
}

impl Batch {
    /// Build a batch applying one action to every entity, in the given order
    pub fn for_action<I, S>(
        action: OperationAction,
        entity_ids: I,
        policy: ExecutionPolicy,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = entity_ids
            .into_iter()
            .map(|entity_id| OperationRecord::new(action.clone(), entity_id))
            .collect();
        Self::from_records(records, policy)
    }

    /// Build a batch from prepared records
    ///
    /// Every record must be fresh: pending, with no result, error or start
    /// time. Record ids and (action, entity) pairs must be unique.
    pub fn from_records(records: Vec<OperationRecord>, policy: ExecutionPolicy) -> Result<Self> {
        let mut pairs = HashSet::with_capacity(records.len());
        let mut ids = HashSet::with_capacity(records.len());
        for record in &records {
            Self::check_fresh(record)?;
            if !pairs.insert((record.action.clone(), record.entity_id.as_str())) {
                return Err(BulkError::DuplicateRecord {
                    action: record.action.to_string(),
                    entity_id: record.entity_id.clone(),
                });
            }
            if !ids.insert(record.id.as_str()) {
                return Err(BulkError::DuplicateRecordId {
                    record_id: record.id.clone(),
                });
            }
        }

        Ok(Self {
            id: Uuid::new_v4(),
            records,
            policy,
            params: Value::Null,
        })
    }

    fn check_fresh(record: &OperationRecord) -> Result<()> {
        if !record.status.is_pending() {
            return Err(BulkError::RecordNotPending {
                record_id: record.id.clone(),
                status: record.status,
            });
        }
        let leftover = if record.error.is_some() {
            Some("error already set")
        } else if record.result.is_some() {
            Some("result already set")
        } else if record.started_at.is_some() || record.finished_at.is_some() {
            Some("already started")
        } else {
            None
        };
        match leftover {
            Some(reason) => Err(BulkError::InvalidRecord {
                record_id: record.id.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [OperationRecord] {
        &mut self.records
    }

    pub fn record(&self, record_id: &str) -> Option<&OperationRecord> {
        self.records.iter().find(|record| record.id == record_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The single action shared by every record, if there is one
    pub fn action(&self) -> Option<&OperationAction> {
        let first = &self.records.first()?.action;
        self.records
            .iter()
            .all(|record| &record.action == first)
            .then_some(first)
    }

    pub fn failed_records(&self) -> impl Iterator<Item = &OperationRecord> {
        self.records
            .iter()
            .filter(|record| record.status == RecordState::Failed)
    }

    pub fn summary(&self) -> BatchSummary {
        summarize(&self.records)
    }

    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot::from_records(&self.records)
    }

    /// A fresh batch holding a new pending record for every failed one
    ///
    /// Policy and params carry over. Errors with `EmptyBatch` when nothing
    /// failed.
    pub fn retry_failed(&self) -> Result<Self> {
        self.resubmit_where(RecordState::Failed)
    }

    /// A fresh batch for the records a cancelled run never started
    ///
    /// Errors with `EmptyBatch` when every record was attempted.
    pub fn resubmit_unattempted(&self) -> Result<Self> {
        self.resubmit_where(RecordState::Pending)
    }

    fn resubmit_where(&self, status: RecordState) -> Result<Self> {
        let records: Vec<_> = self
            .records
            .iter()
            .filter(|record| record.status == status)
            .map(OperationRecord::resubmit)
            .collect();
        if records.is_empty() {
            return Err(BulkError::EmptyBatch);
        }
        Ok(Self::from_records(records, self.policy)?.with_params(self.params.clone()))
    }
}
