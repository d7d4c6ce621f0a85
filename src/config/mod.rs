//! # Runner Configuration
//!
//! Layered configuration for batch runs: built-in defaults, then
//! `config/bulk-runner.yaml`, then `config/bulk-runner.<env>.yaml`, then
//! `BULK_RUNNER__*` environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bulk_runner::config::ConfigManager;
//! use bulk_runner::models::OperationAction;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let policy = manager.config().policy_for(&OperationAction::Issue);
//! let timeout = manager.config().action_timeout();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::constants::{actions, DEFAULT_ACTION_TIMEOUT_MS, DEFAULT_EVENT_CHANNEL_CAPACITY};
use crate::execution::ExecutionPolicy;
use crate::models::OperationAction;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration mirroring `config/bulk-runner.yaml`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Per-action timeout; `null`/absent disables it
    pub action_timeout_ms: Option<u64>,

    /// Policy for actions without an entry in `action_policies`
    pub default_policy: ExecutionPolicy,

    /// Policy per action name (revoke, issue, ...)
    pub action_policies: HashMap<String, ExecutionPolicy>,

    pub events: EventsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EventsConfig {
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let action_policies = HashMap::from([
            (actions::REVOKE.to_string(), ExecutionPolicy::revocation()),
            (actions::ISSUE.to_string(), ExecutionPolicy::issuance()),
        ]);

        Self {
            action_timeout_ms: Some(DEFAULT_ACTION_TIMEOUT_MS),
            default_policy: ExecutionPolicy::Sequential,
            action_policies,
            events: EventsConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Execution policy for an action, falling back to the default policy
    pub fn policy_for(&self, action: &OperationAction) -> ExecutionPolicy {
        self.action_policies
            .get(action.as_str())
            .copied()
            .unwrap_or(self.default_policy)
    }

    pub fn action_timeout(&self) -> Option<Duration> {
        self.action_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.action_timeout_ms == Some(0) {
            return Err(ConfigurationError::invalid_value(
                "action_timeout_ms",
                "must be greater than zero when set",
            ));
        }

        if self.default_policy.validate().is_err() {
            return Err(ConfigurationError::invalid_value(
                "default_policy.limit",
                "concurrency limit must be at least 1",
            ));
        }

        for (action, policy) in &self.action_policies {
            if policy.validate().is_err() {
                return Err(ConfigurationError::invalid_value(
                    format!("action_policies.{action}.limit"),
                    "concurrency limit must be at least 1",
                ));
            }
        }

        if self.events.channel_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "events.channel_capacity",
                "must be greater than zero",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policies_match_console_flows() {
        let config = RunnerConfig::default();
        assert_eq!(
            config.policy_for(&OperationAction::Revoke),
            ExecutionPolicy::Sequential
        );
        assert_eq!(
            config.policy_for(&OperationAction::Issue),
            ExecutionPolicy::issuance()
        );
        assert_eq!(
            config.policy_for(&OperationAction::Custom("suspend".to_string())),
            ExecutionPolicy::Sequential
        );
        assert_eq!(config.action_timeout(), Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_limits() {
        let mut config = RunnerConfig::default();
        config
            .action_policies
            .insert("download".to_string(), ExecutionPolicy::concurrent(0));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("action_policies.download.limit"));
    }

    #[test]
    fn test_validation_rejects_zero_capacity_and_timeout() {
        let mut config = RunnerConfig::default();
        config.events.channel_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = RunnerConfig::default();
        config.action_timeout_ms = Some(0);
        assert!(config.validate().is_err());
    }
}
