//! Configuration management for XController
//!
//! Handles loading, parsing and validation of the YAML configuration file.
//! Every section is optional; missing values fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub sticks: StickConfig,
}

/// Device polling configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PollingConfig {
    /// Milliseconds between two snapshots, at least 1
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Per-stick deadzone ratios
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StickConfig {
    #[serde(default = "default_deadzone")]
    pub left_deadzone: f64,
    #[serde(default = "default_deadzone")]
    pub right_deadzone: f64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            enabled: default_true(),
        }
    }
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            left_deadzone: default_deadzone(),
            right_deadzone: default_deadzone(),
        }
    }
}

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("polling interval must be at least 1 ms, got {0}")]
    InvalidPollingInterval(u64),

    /// Deadzone must lie in `[0, 1)`; `1.0` would divide by zero in the
    /// radial rescale.
    #[error("{stick} deadzone must be in [0, 1), got {value}")]
    InvalidDeadzone { stick: &'static str, value: f64 },
}

impl AppConfig {
    /// Load configuration from file with validation
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to an empty mapping
        let config: AppConfig = if contents.trim().is_empty() {
            AppConfig::default()
        } else {
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for correctness
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.polling.interval_ms < 1 {
            return Err(ConfigError::InvalidPollingInterval(self.polling.interval_ms));
        }
        validate_deadzone("left", self.sticks.left_deadzone)?;
        validate_deadzone("right", self.sticks.right_deadzone)?;
        Ok(())
    }
}

fn validate_deadzone(stick: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDeadzone { stick, value })
    }
}

fn default_interval_ms() -> u64 { 10 }
fn default_true() -> bool { true }
fn default_deadzone() -> f64 { 0.15 }
