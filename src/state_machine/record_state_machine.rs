use chrono::Utc;

use super::{
    errors::{StateMachineError, StateMachineResult},
    events::RecordEvent,
    states::RecordState,
};
use crate::models::OperationRecord;

/// State machine for a single operation record
///
/// Borrows the record for the duration of one transition. The record is only
/// mutated when the transition is legal; a rejected event leaves it untouched.
pub struct RecordStateMachine<'a> {
    record: &'a mut OperationRecord,
}

impl<'a> RecordStateMachine<'a> {
    pub fn new(record: &'a mut OperationRecord) -> Self {
        Self { record }
    }

    pub fn current_state(&self) -> RecordState {
        self.record.status
    }

    /// Apply an event and return the new state
    pub fn transition(&mut self, event: RecordEvent) -> StateMachineResult<RecordState> {
        let from = self.record.status;
        let target = Self::determine_target_state(&self.record.id, from, &event)?;
        let now = Utc::now();

        match event {
            RecordEvent::Start => {
                self.record.started_at = Some(now);
            }
            RecordEvent::Complete(result) => {
                self.record.result = result;
                self.record.error = None;
                self.record.finished_at = Some(now);
            }
            RecordEvent::Fail(message) => {
                self.record.error = Some(message);
                self.record.result = None;
                self.record.finished_at = Some(now);
            }
        }
        self.record.status = target;

        Ok(target)
    }

    /// Determine the target state based on current state and event
    pub fn determine_target_state(
        record_id: &str,
        current_state: RecordState,
        event: &RecordEvent,
    ) -> StateMachineResult<RecordState> {
        let target = match (current_state, event) {
            (RecordState::Pending, RecordEvent::Start) => RecordState::Processing,
            (RecordState::Processing, RecordEvent::Complete(_)) => RecordState::Completed,
            (RecordState::Processing, RecordEvent::Fail(_)) => RecordState::Failed,

            // Terminal states never move again, and processing is never skipped
            (from, _) => {
                return Err(StateMachineError::InvalidTransition {
                    record_id: record_id.to_string(),
                    from,
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationAction;
    use serde_json::json;

    fn record() -> OperationRecord {
        OperationRecord::new(OperationAction::Revoke, "cred-1")
    }

    #[test]
    fn test_record_lifecycle_success() {
        let mut record = record();
        let mut sm = RecordStateMachine::new(&mut record);

        assert_eq!(sm.transition(RecordEvent::Start).unwrap(), RecordState::Processing);
        assert_eq!(
            sm.transition(RecordEvent::complete_with_result(json!("vc-9")))
                .unwrap(),
            RecordState::Completed
        );

        assert_eq!(record.status, RecordState::Completed);
        assert_eq!(record.result, Some(json!("vc-9")));
        assert!(record.error.is_none());
        assert!(record.started_at.is_some());
        assert!(record.finished_at.is_some());
    }

    #[test]
    fn test_record_lifecycle_failure() {
        let mut record = record();
        let mut sm = RecordStateMachine::new(&mut record);
        sm.transition(RecordEvent::Start).unwrap();
        sm.transition(RecordEvent::fail_with_error("credential not active"))
            .unwrap();

        assert_eq!(record.status, RecordState::Failed);
        assert_eq!(record.error.as_deref(), Some("credential not active"));
        assert!(record.result.is_none());
    }

    #[test]
    fn test_processing_cannot_be_skipped() {
        let mut record = record();
        let err = RecordStateMachine::new(&mut record)
            .transition(RecordEvent::complete_simple())
            .unwrap_err();

        assert!(matches!(
            err,
            StateMachineError::InvalidTransition {
                from: RecordState::Pending,
                ..
            }
        ));
        assert_eq!(record.status, RecordState::Pending);
        assert!(record.finished_at.is_none());
    }

    #[test]
    fn test_terminal_states_reject_every_event() {
        for terminal in [RecordState::Completed, RecordState::Failed] {
            for event in [
                RecordEvent::Start,
                RecordEvent::complete_simple(),
                RecordEvent::fail_with_error("late"),
            ] {
                assert!(
                    RecordStateMachine::determine_target_state("r", terminal, &event).is_err(),
                    "{terminal} accepted {}",
                    event.event_type()
                );
            }
        }
    }

    #[test]
    fn test_rejected_transition_leaves_record_untouched() {
        let mut record = record();
        {
            let mut sm = RecordStateMachine::new(&mut record);
            sm.transition(RecordEvent::Start).unwrap();
            sm.transition(RecordEvent::complete_with_result(json!(1))).unwrap();
        }
        let before = record.clone();

        let result =
            RecordStateMachine::new(&mut record).transition(RecordEvent::fail_with_error("x"));
        assert!(result.is_err());
        assert_eq!(record, before);
    }
}
