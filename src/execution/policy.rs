//! # Execution Policy
//!
//! How many records of a batch are in flight at once, and in what order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::constants::{ISSUANCE_BATCH_SIZE, ISSUANCE_INTER_GROUP_DELAY_MS};
use crate::error::{BulkError, Result};

/// Strategy governing in-flight records for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExecutionPolicy {
    /// One record at a time, in submission order
    #[default]
    Sequential,
    /// Consecutive groups of `limit` records in flight together; a group fully
    /// settles before the next one starts
    Concurrent {
        limit: usize,
        #[serde(default)]
        inter_group_delay_ms: u64,
    },
}

impl ExecutionPolicy {
    /// Policy used for bulk revocation
    pub fn revocation() -> Self {
        Self::Sequential
    }

    /// Policy used for bulk issuance: groups of five, one second apart
    pub fn issuance() -> Self {
        Self::Concurrent {
            limit: ISSUANCE_BATCH_SIZE,
            inter_group_delay_ms: ISSUANCE_INTER_GROUP_DELAY_MS,
        }
    }

    pub fn concurrent(limit: usize) -> Self {
        Self::Concurrent {
            limit,
            inter_group_delay_ms: 0,
        }
    }

    pub fn with_inter_group_delay(self, delay: Duration) -> Self {
        match self {
            Self::Sequential => Self::Sequential,
            Self::Concurrent { limit, .. } => Self::Concurrent {
                limit,
                inter_group_delay_ms: delay.as_millis() as u64,
            },
        }
    }

    /// Number of records started together
    pub fn group_size(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Concurrent { limit, .. } => *limit,
        }
    }

    pub fn inter_group_delay(&self) -> Duration {
        match self {
            Self::Sequential => Duration::ZERO,
            Self::Concurrent {
                inter_group_delay_ms,
                ..
            } => Duration::from_millis(*inter_group_delay_ms),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Concurrent { limit: 0, .. } => Err(BulkError::InvalidPolicy(
                "concurrency limit must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ExecutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Concurrent {
                limit,
                inter_group_delay_ms,
            } => write!(f, "concurrent(limit={limit}, delay={inter_group_delay_ms}ms)"),
        }
    }
}
