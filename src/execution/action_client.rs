//! # Remote Action Client
//!
//! The runner's only seam to the outside world. Implementations perform one
//! action (revoke, issue, ...) against one entity; transport is theirs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

use crate::models::{OperationAction, OperationRecord};

/// Everything a remote action needs to act on one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub record_id: String,
    pub action: OperationAction,
    pub entity_id: String,
    /// Caller-supplied parameters shared by the whole batch
    pub params: Value,
}

impl ActionRequest {
    pub fn for_record(record: &OperationRecord, params: &Value) -> Self {
        Self {
            record_id: record.id.clone(),
            action: record.action.clone(),
            entity_id: record.entity_id.clone(),
            params: params.clone(),
        }
    }

    /// Look up a string parameter such as a revocation reason
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// Failure reported by a remote action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ActionError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(format!("{err:#}"))
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

pub type ActionResult = Result<Option<Value>, ActionError>;

/// Performs one action against one entity
#[async_trait]
pub trait RemoteActionClient: Send + Sync {
    async fn execute(&self, request: ActionRequest) -> ActionResult;
}

#[async_trait]
impl<T: RemoteActionClient + ?Sized> RemoteActionClient for std::sync::Arc<T> {
    async fn execute(&self, request: ActionRequest) -> ActionResult {
        (**self).execute(request).await
    }
}

/// Adapter turning an async closure into a [`RemoteActionClient`]
pub struct FnActionClient<F> {
    f: F,
}

/// Wrap an async closure as a remote action client
///
/// ```rust,no_run
/// use bulk_runner::execution::action_fn;
/// use serde_json::json;
///
/// let client = action_fn(|request| async move {
///     Ok(Some(json!({ "revoked": request.entity_id })))
/// });
/// ```
pub fn action_fn<F, Fut>(f: F) -> FnActionClient<F>
where
    F: Fn(ActionRequest) -> Fut + Send + Sync,
    Fut: Future<Output = ActionResult> + Send,
{
    FnActionClient { f }
}

#[async_trait]
impl<F, Fut> RemoteActionClient for FnActionClient<F>
where
    F: Fn(ActionRequest) -> Fut + Send + Sync,
    Fut: Future<Output = ActionResult> + Send,
{
    async fn execute(&self, request: ActionRequest) -> ActionResult {
        (self.f)(request).await
    }
}
