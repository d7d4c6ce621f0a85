use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::FALLBACK_ERROR_MESSAGE;

/// Events that can trigger operation record state transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RecordEvent {
    /// The runner is about to invoke the remote action
    Start,
    /// The remote action resolved, with an optional result payload
    Complete(Option<Value>),
    /// The remote action rejected with a message
    Fail(String),
}

impl RecordEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete(_) => "complete",
            Self::Fail(_) => "fail",
        }
    }

    /// Extract error message if this is a failure event
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Fail(msg) => Some(msg),
            _ => None,
        }
    }

    /// Extract the result if this is a completion event
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Complete(result) => result.as_ref(),
            _ => None,
        }
    }

    /// Check if this event represents a terminal transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Fail(_))
    }

    /// Create a failure event, substituting the generic message for a blank one
    pub fn fail_with_error(error: impl Into<String>) -> Self {
        let error = error.into();
        if error.trim().is_empty() {
            Self::Fail(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            Self::Fail(error)
        }
    }

    pub fn complete_with_result(result: Value) -> Self {
        Self::Complete(Some(result))
    }

    pub fn complete_simple() -> Self {
        Self::Complete(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_failure_uses_fallback_message() {
        assert_eq!(
            RecordEvent::fail_with_error("   ").error_message(),
            Some(FALLBACK_ERROR_MESSAGE)
        );
        assert_eq!(
            RecordEvent::fail_with_error("credential not active").error_message(),
            Some("credential not active")
        );
    }

    #[test]
    fn test_event_accessors() {
        let event = RecordEvent::complete_with_result(json!({"credential_id": "vc-1"}));
        assert_eq!(event.event_type(), "complete");
        assert!(event.is_terminal());
        assert_eq!(event.result(), Some(&json!({"credential_id": "vc-1"})));
        assert!(!RecordEvent::Start.is_terminal());
        assert!(RecordEvent::complete_simple().result().is_none());
    }
}
