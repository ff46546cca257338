//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags override whatever is loaded here.

use std::env;

use estimator_core::WorkingWeek;
use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// tracing filter directive (`ESTIMATOR_LOG`)
    pub log_filter: String,

    /// Pretty-print JSON output (`ESTIMATOR_PRETTY`)
    pub pretty: bool,

    /// Working week for `days` when `--week` is not given
    /// (`ESTIMATOR_WORKING_WEEK`)
    pub working_week: WorkingWeek,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_filter: "info".to_string(),
            pretty: true,
            working_week: WorkingWeek::MonFri,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. `load` uses the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let pretty = match lookup("ESTIMATOR_PRETTY") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("ESTIMATOR_PRETTY".to_string(), raw))?,
            None => defaults.pretty,
        };

        let working_week = match lookup("ESTIMATOR_WORKING_WEEK") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ESTIMATOR_WORKING_WEEK".to_string(), raw))?,
            None => defaults.working_week,
        };

        Ok(CliConfig {
            log_filter: lookup("ESTIMATOR_LOG").unwrap_or(defaults.log_filter),
            pretty,
            working_week,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    InvalidValue(String, String),
}
