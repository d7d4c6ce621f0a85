use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a single operation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// Initial state; the action has not been attempted
    #[default]
    Pending,
    /// The remote action is in flight
    Processing,
    /// The remote action succeeded
    Completed,
    /// The remote action failed or timed out
    Failed,
}

impl RecordState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Check if this is an active state (action in flight)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Processing)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for RecordState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid record state: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_state_terminal_check() {
        assert!(RecordState::Completed.is_terminal());
        assert!(RecordState::Failed.is_terminal());
        assert!(!RecordState::Pending.is_terminal());
        assert!(!RecordState::Processing.is_terminal());
        assert!(RecordState::Processing.is_active());
    }

    #[test]
    fn test_state_string_conversion() {
        assert_eq!(RecordState::Processing.to_string(), "processing");
        assert_eq!(
            "failed".parse::<RecordState>().unwrap(),
            RecordState::Failed
        );
        assert!("in_progress".parse::<RecordState>().is_err());
    }

    #[test]
    fn test_state_serde() {
        let json = serde_json::to_string(&RecordState::Completed).unwrap();
        assert_eq!(json, "\"completed\"");

        let parsed: RecordState = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, RecordState::Pending);
        assert_eq!(RecordState::default(), RecordState::Pending);
    }
}
