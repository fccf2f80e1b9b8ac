//! Engine configuration
//!
//! Settings that control how form configurations are fetched and checked.
//! Every setting has a default and may be overridden from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable for the remote fetch timeout, in seconds
pub const ENV_FETCH_TIMEOUT_SECS: &str = "DYNAFORM_FETCH_TIMEOUT_SECS";
/// Environment variable toggling load-time validation
pub const ENV_VALIDATE_ON_LOAD: &str = "DYNAFORM_VALIDATE_ON_LOAD";
/// Environment variable toggling strict condition reference checks
pub const ENV_STRICT_REFERENCES: &str = "DYNAFORM_STRICT_REFERENCES";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout for fetching remote configurations, in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Run structural validation when a configuration is loaded
    #[serde(default = "default_true")]
    pub validate_on_load: bool,

    /// Treat conditions that reference unknown fields as errors.
    /// When disabled they are logged and the condition evaluates against null.
    #[serde(default = "default_true")]
    pub strict_references: bool,
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            validate_on_load: true,
            strict_references: true,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(timeout) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            match timeout.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.fetch_timeout_secs = secs,
                _ => warn!("Invalid {} value: {}", ENV_FETCH_TIMEOUT_SECS, timeout),
            }
        }

        if let Some(value) = lookup(ENV_VALIDATE_ON_LOAD) {
            match parse_flag(&value) {
                Some(flag) => config.validate_on_load = flag,
                None => warn!("Invalid {} value: {}", ENV_VALIDATE_ON_LOAD, value),
            }
        }

        if let Some(value) = lookup(ENV_STRICT_REFERENCES) {
            match parse_flag(&value) {
                Some(flag) => config.strict_references = flag,
                None => warn!("Invalid {} value: {}", ENV_STRICT_REFERENCES, value),
            }
        }

        debug!(?config, "Loaded engine configuration");
        config
    }

    /// Remote fetch timeout
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
