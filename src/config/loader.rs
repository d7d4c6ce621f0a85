//! Configuration Loader
//!
//! Environment-aware loading of [`RunnerConfig`]. Sources are merged in order,
//! later sources overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. `<dir>/bulk-runner.yaml` (optional)
//! 3. `<dir>/bulk-runner.<environment>.yaml` (optional)
//! 4. environment variables such as `BULK_RUNNER__ACTION_TIMEOUT_MS=5000` or
//!    `BULK_RUNNER__ACTION_POLICIES__ISSUE__LIMIT=10`

use config::{Config, Environment, File};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::error::ConfigResult;
use super::RunnerConfig;
use crate::events::EventPublisher;

const CONFIG_FILE_STEM: &str = "bulk-runner";
const ENV_PREFIX: &str = "BULK_RUNNER";
const ENV_SEPARATOR: &str = "__";

/// Loaded configuration plus the context it was loaded from
#[derive(Debug)]
pub struct ConfigManager {
    config: RunnerConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::build(config_dir, environment, None)
    }

    /// Load with an explicit set of `BULK_RUNNER__*` variables instead of the
    /// process environment
    pub fn load_with_variables(
        config_dir: Option<PathBuf>,
        environment: &str,
        variables: HashMap<String, String>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::build(config_dir, environment, Some(variables))
    }

    fn build(
        config_dir: Option<PathBuf>,
        environment: &str,
        variables: Option<HashMap<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let settings = Config::builder()
            .add_source(Config::try_from(&RunnerConfig::default())?)
            .add_source(
                File::with_name(
                    &config_directory
                        .join(format!("{CONFIG_FILE_STEM}.yaml"))
                        .to_string_lossy(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    &config_directory
                        .join(format!("{CONFIG_FILE_STEM}.{environment}.yaml"))
                        .to_string_lossy(),
                )
                .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(variables),
            )
            .build()?;

        let config: RunnerConfig = settings.try_deserialize()?;
        config.validate()?;

        tracing::info!(
            environment = %environment,
            action_timeout_ms = config.action_timeout_ms,
            default_policy = %config.default_policy,
            action_policies = config.action_policies.len(),
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    /// Event publisher sized from `events.channel_capacity`
    pub fn event_publisher(&self) -> EventPublisher {
        EventPublisher::new(self.config.events.channel_capacity)
    }

    /// Current environment name (`BULK_RUNNER_ENV`, then `APP_ENV`, default
    /// `development`)
    pub fn detect_environment() -> String {
        env::var("BULK_RUNNER_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn default_config_directory() -> PathBuf {
        env::var("BULK_RUNNER_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"))
    }
}
