//! Configuration file loading for sagaguard.
//!
//! Reads `sagaguard.json` from the config directory (`.sagaguard` by default).
//! Falls back to defaults when the file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "sagaguard.json";
pub const DEFAULT_CONFIG_DIR: &str = ".sagaguard";

/// Top-level sagaguard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaGuardConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub capabilities: CapabilityConfig,
    /// Qualified name every retry/non-retryable exception must derive from.
    #[serde(default = "default_failure_base_type")]
    pub failure_base_type: String,
    /// Rule codes reported as suppressed info instead of errors.
    #[serde(default)]
    pub suppress: Vec<String>,
    #[serde(default)]
    pub parallel: bool,
}

/// Names of the marker interfaces the rules look for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityConfig {
    #[serde(default = "default_saga_capability")]
    pub saga: String,
    #[serde(default = "default_message_capability")]
    pub message: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_failure_base_type() -> String {
    "System.Exception".to_string()
}
fn default_saga_capability() -> String {
    "SagaCapability".to_string()
}
fn default_message_capability() -> String {
    "MessageCapability".to_string()
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            saga: default_saga_capability(),
            message: default_message_capability(),
        }
    }
}

impl Default for SagaGuardConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            capabilities: CapabilityConfig::default(),
            failure_base_type: default_failure_base_type(),
            suppress: vec![],
            parallel: false,
        }
    }
}

impl SagaGuardConfig {
    /// Load configuration from `sagaguard.json` inside `config_dir`.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }
}
