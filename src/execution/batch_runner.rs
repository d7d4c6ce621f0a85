//! # Batch Runner
//!
//! Drives every record of a batch to a terminal state through the batch's
//! execution policy. Records are processed in consecutive groups (a group of
//! one under the sequential policy); a group's actions are polled together on
//! the runner's own task and the next group starts only after the whole group
//! settled.
//!
//! A failing action only fails its own record. `run` returns `Err` solely for
//! batch-level precondition failures, which are detected before any record
//! moves or any observer is called.

use futures::stream::{FuturesUnordered, StreamExt};
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::action_client::{ActionRequest, RemoteActionClient};
use super::observer::BatchObserver;
use crate::config::RunnerConfig;
use crate::error::{BulkError, Result};
use crate::events::{BatchEvent, EventPublisher};
use crate::logging::{log_batch_operation, log_record_transition};
use crate::models::Batch;
use crate::reporting::BatchSummary;
use crate::state_machine::{RecordEvent, RecordStateMachine};

pub struct BatchRunner<C> {
    client: C,
    /// Applied to every remote action; `None` leaves timeouts to the client
    action_timeout: Option<Duration>,
    cancellation: CancellationToken,
    observers: Vec<Arc<dyn BatchObserver>>,
    publisher: Option<EventPublisher>,
}

impl<C: RemoteActionClient> BatchRunner<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            action_timeout: None,
            cancellation: CancellationToken::new(),
            observers: Vec::new(),
            publisher: None,
        }
    }

    /// Create a runner using the configured action timeout
    ///
    /// The configuration is validated first, so a runner is never built from
    /// values the loader would have refused.
    pub fn from_config(client: C, config: &RunnerConfig) -> Result<Self> {
        config.validate()?;
        let runner = Self::new(client);
        Ok(match config.action_timeout() {
            Some(timeout) => runner.with_timeout(timeout),
            None => runner,
        })
    }

    /// Bound every remote action; a zero timeout is rejected when the batch runs
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = Some(timeout);
        self
    }

    pub fn with_observer(mut self, observer: impl BatchObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    pub fn with_event_publisher(mut self, publisher: EventPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Stop starting new records; in-flight actions still settle
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Run every pending record of the batch and summarize the outcome
    ///
    /// On cancellation the records not yet started stay pending and the
    /// returned summary only counts what was attempted.
    pub async fn run(&self, batch: &mut Batch) -> Result<BatchSummary> {
        self.check_preconditions(batch)?;

        let started = Instant::now();
        let action = batch.action().cloned();
        let action_name = action.as_ref().map(ToString::to_string);
        let policy = batch.policy;

        log_batch_operation(
            "run",
            batch.id,
            action_name.as_deref(),
            batch.len(),
            "started",
            Some(&policy.to_string()),
        );
        self.publish(BatchEvent::BatchStarted {
            batch_id: batch.id,
            action,
            total: batch.len(),
            policy,
        });

        let group_size = policy.group_size();
        let delay = policy.inter_group_delay();
        let total = batch.len();
        let mut next = 0;
        let mut cancelled = false;

        while next < total {
            if next > 0 && !delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = self.cancellation.cancelled() => {}
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            // checked after the delay too, so a cancel that lands as the
            // sleep elapses still stops the next group
            if self.cancellation.is_cancelled() {
                cancelled = true;
                break;
            }

            let end = (next + group_size).min(total);
            self.run_group(batch, next..end).await;
            next = end;
        }

        let summary = batch.summary();
        if cancelled {
            warn!(
                batch_id = %batch.id,
                attempted = summary.succeeded + summary.failed,
                not_started = summary.unattempted(),
                "Batch cancelled before all records started"
            );
        }
        log_batch_operation(
            "run",
            batch.id,
            action_name.as_deref(),
            total,
            if cancelled { "cancelled" } else { "completed" },
            Some(&format!(
                "succeeded={} failed={} elapsed_ms={}",
                summary.succeeded,
                summary.failed,
                started.elapsed().as_millis()
            )),
        );
        self.publish(BatchEvent::BatchCompleted {
            batch_id: batch.id,
            summary,
            cancelled,
        });

        Ok(summary)
    }

    fn check_preconditions(&self, batch: &Batch) -> Result<()> {
        if batch.is_empty() {
            return Err(BulkError::EmptyBatch);
        }
        batch.policy.validate()?;
        if self.action_timeout == Some(Duration::ZERO) {
            return Err(BulkError::InvalidTimeout);
        }

        if let Some(record) = batch.records().iter().find(|r| !r.status.is_pending()) {
            return Err(BulkError::RecordNotPending {
                record_id: record.id.clone(),
                status: record.status,
            });
        }
        Ok(())
    }

    /// Start every record in `range`, then settle them as their actions return
    async fn run_group(&self, batch: &mut Batch, range: Range<usize>) {
        debug!(batch_id = %batch.id, from = range.start, to = range.end, "Starting record group");

        let mut requests = Vec::with_capacity(range.len());
        for index in range {
            if self.apply(batch, index, RecordEvent::Start) {
                let request = ActionRequest::for_record(&batch.records()[index], &batch.params);
                requests.push((index, request));
            }
        }

        let mut in_flight: FuturesUnordered<_> = requests
            .into_iter()
            .map(|(index, request)| async move { (index, self.invoke(request).await) })
            .collect();

        while let Some((index, outcome)) = in_flight.next().await {
            self.apply(batch, index, outcome);
        }
    }

    /// Call the remote action and turn its outcome into a terminal event
    async fn invoke(&self, request: ActionRequest) -> RecordEvent {
        let record_id = request.record_id.clone();

        let outcome = match self.action_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.client.execute(request)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(record_id = %record_id, timeout_ms = limit.as_millis() as u64, "Remote action timed out");
                    return RecordEvent::fail_with_error(format!(
                        "Operation timed out after {}ms",
                        limit.as_millis()
                    ));
                }
            },
            None => self.client.execute(request).await,
        };

        match outcome {
            Ok(result) => RecordEvent::Complete(result),
            Err(err) => {
                debug!(record_id = %record_id, error = %err, "Remote action failed");
                RecordEvent::fail_with_error(err.message)
            }
        }
    }

    /// Apply one event to one record, then log, publish and notify
    ///
    /// Returns false when the state machine rejected the event; the record is
    /// left as it was.
    fn apply(&self, batch: &mut Batch, index: usize, event: RecordEvent) -> bool {
        let batch_id = batch.id;
        let record = &mut batch.records_mut()[index];
        let from = record.status;

        let transition = RecordStateMachine::new(&mut *record).transition(event);
        let to = match transition {
            Ok(to) => to,
            Err(err) => {
                error!(batch_id = %batch_id, error = %err, "Rejected record transition");
                return false;
            }
        };

        log_record_transition(
            batch_id,
            &record.id,
            &record.entity_id,
            from,
            to,
            record.error.as_deref(),
        );
        if let Some(publisher) = &self.publisher {
            publisher.publish(BatchEvent::RecordTransitioned {
                batch_id,
                record_id: record.id.clone(),
                entity_id: record.entity_id.clone(),
                from,
                to,
                error: record.error.clone(),
            });
        }

        for observer in &self.observers {
            observer.on_update(batch.records());
        }
        true
    }

    fn publish(&self, event: BatchEvent) {
        if let Some(publisher) = &self.publisher {
            let delivered = publisher.publish(event);
            debug!(subscribers = delivered, "Published batch event");
        }
    }
}

impl<C> std::fmt::Debug for BatchRunner<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRunner")
            .field("action_timeout", &self.action_timeout)
            .field("cancelled", &self.cancellation.is_cancelled())
            .field("observers", &self.observers.len())
            .field("publishing", &self.publisher.is_some())
            .finish()
    }
}
