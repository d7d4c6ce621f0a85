use async_trait::async_trait;
use bulk_runner::{ActionError, ActionRequest, ActionResult, RemoteActionClient};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Scripted behaviour for one entity
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Succeed(Option<Value>),
    Fail(String),
    /// Never resolves; only a timeout gets the record out of processing
    Hang,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallEvent {
    Started(String),
    Finished(String),
}

/// Remote action client whose per-entity outcomes are scripted by the test
///
/// Entities without a script succeed with `{"entity_id": <id>}`.
#[derive(Debug, Clone, Default)]
pub struct MockActionClient {
    outcomes: HashMap<String, MockOutcome>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    cancel_on_start: Option<(String, CancellationToken)>,
    calls: Arc<Mutex<Vec<CallEvent>>>,
    requests: Arc<Mutex<Vec<ActionRequest>>>,
}

impl MockActionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn delay(mut self, entity_id: &str, delay: Duration) -> Self {
        self.delays.insert(entity_id.to_string(), delay);
        self
    }

    pub fn fail(mut self, entity_id: &str, message: &str) -> Self {
        self.outcomes
            .insert(entity_id.to_string(), MockOutcome::Fail(message.to_string()));
        self
    }

    pub fn succeed_with(mut self, entity_id: &str, result: Option<Value>) -> Self {
        self.outcomes
            .insert(entity_id.to_string(), MockOutcome::Succeed(result));
        self
    }

    pub fn hang(mut self, entity_id: &str) -> Self {
        self.outcomes.insert(entity_id.to_string(), MockOutcome::Hang);
        self
    }

    /// Cancel `token` as soon as the action for `entity_id` starts
    pub fn cancel_when_started(mut self, entity_id: &str, token: CancellationToken) -> Self {
        self.cancel_on_start = Some((entity_id.to_string(), token));
        self
    }

    pub fn calls(&self) -> Vec<CallEvent> {
        self.calls.lock().clone()
    }

    /// Entity ids in the order their actions started
    pub fn started(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                CallEvent::Started(entity) => Some(entity.clone()),
                CallEvent::Finished(_) => None,
            })
            .collect()
    }

    pub fn requests(&self) -> Vec<ActionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl RemoteActionClient for MockActionClient {
    async fn execute(&self, request: ActionRequest) -> ActionResult {
        let entity_id = request.entity_id.clone();
        self.calls.lock().push(CallEvent::Started(entity_id.clone()));
        self.requests.lock().push(request);

        if let Some((trigger, token)) = &self.cancel_on_start {
            if trigger == &entity_id {
                token.cancel();
            }
        }

        let delay = self
            .delays
            .get(&entity_id)
            .copied()
            .unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let outcome = self
            .outcomes
            .get(&entity_id)
            .cloned()
            .unwrap_or_else(|| MockOutcome::Succeed(Some(json!({ "entity_id": entity_id }))));

        let result = match outcome {
            MockOutcome::Succeed(result) => Ok(result),
            MockOutcome::Fail(message) => Err(ActionError::new(message)),
            MockOutcome::Hang => std::future::pending().await,
        };

        self.calls.lock().push(CallEvent::Finished(entity_id));
        result
    }
}
