//! # Operation Record
//!
//! Tracked state for one entity going through a bulk operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::constants::actions;
use crate::state_machine::RecordState;

/// Action performed against each entity of a batch
///
/// The four console actions are built in; hosts can add their own through
/// `Custom`. Serialized as the bare action name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationAction {
    Revoke,
    Download,
    Delete,
    Issue,
    Custom(String),
}

impl OperationAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Revoke => actions::REVOKE,
            Self::Download => actions::DOWNLOAD,
            Self::Delete => actions::DELETE,
            Self::Issue => actions::ISSUE,
            Self::Custom(name) => name,
        }
    }
}

impl From<String> for OperationAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            actions::REVOKE => Self::Revoke,
            actions::DOWNLOAD => Self::Download,
            actions::DELETE => Self::Delete,
            actions::ISSUE => Self::Issue,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for OperationAction {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OperationAction> for String {
    fn from(action: OperationAction) -> Self {
        match action {
            OperationAction::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for OperationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-entity state within a batch
///
/// `error` is only set on `Failed` and `result` only on `Completed`; both are
/// written by the record state machine on the terminal transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: String,
    pub entity_id: String,
    pub action: OperationAction,
    pub status: RecordState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl OperationRecord {
    /// Create a pending record with id `<action>-<entity_id>`
    pub fn new(action: OperationAction, entity_id: impl Into<String>) -> Self {
        let entity_id = entity_id.into();
        Self {
            id: Self::record_id(&action, &entity_id),
            entity_id,
            action,
            status: RecordState::Pending,
            error: None,
            result: None,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn record_id(action: &OperationAction, entity_id: &str) -> String {
        format!("{action}-{entity_id}")
    }

    /// A new pending record for the same (action, entity) pair
    pub fn resubmit(&self) -> Self {
        Self::new(self.action.clone(), self.entity_id.clone())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
