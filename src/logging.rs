//! # Structured Logging Module
//!
//! Environment-aware structured logging for batch runs. Hosts call
//! [`init_structured_logging`] once; library code only emits `tracing` events.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

use crate::config::ConfigManager;
use crate::state_machine::RecordState;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
///
/// `RUST_LOG` wins over the environment default. Set
/// `BULK_RUNNER_LOG_FORMAT=json` for JSON lines.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = ConfigManager::detect_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));
        let json = std::env::var("BULK_RUNNER_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let console = if json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed()
        };

        // A host may already have installed a subscriber
        if tracing_subscriber::registry().with(console).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            json = json,
            "Structured logging initialized"
        );
    });
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for batch-level operations
pub fn log_batch_operation(
    operation: &str,
    batch_id: Uuid,
    action: Option<&str>,
    total: usize,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        batch_id = %batch_id,
        action = action,
        total = total,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "BATCH_OPERATION"
    );
}

/// Log a single record status transition
pub fn log_record_transition(
    batch_id: Uuid,
    record_id: &str,
    entity_id: &str,
    from: RecordState,
    to: RecordState,
    error: Option<&str>,
) {
    if to == RecordState::Failed {
        tracing::warn!(
            batch_id = %batch_id,
            record_id = %record_id,
            entity_id = %entity_id,
            from = %from,
            to = %to,
            error = error,
            "RECORD_TRANSITION"
        );
    } else {
        tracing::debug!(
            batch_id = %batch_id,
            record_id = %record_id,
            entity_id = %entity_id,
            from = %from,
            to = %to,
            "RECORD_TRANSITION"
        );
    }
}
