//! # Timeline Configuration
//!
//! All tunables are carried in one [`TimelineConfig`] value that is handed to the
//! screen explicitly. Files are TOML; every key is optional and falls back to its default.
//!
//! ```toml
//! row_height = 96.0
//! disclosure_duration_ms = 300
//! step_duration_ms = 500
//! frame_interval_ms = 16
//! delivery_lead_days = 5
//! currency_symbol = "$"
//! date_format = "%b %d, %Y"
//! exclusive_expansion = true
//! actor_buffer = 32
//! ```

use crate::normalizer::format::is_valid_date_format;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Height of one item line in an expanded row.
    pub row_height: f32,
    pub disclosure_duration_ms: u64,
    pub step_duration_ms: u64,
    pub frame_interval_ms: u64,
    pub delivery_lead_days: i64,
    pub currency_symbol: String,
    /// A `chrono` format string.
    pub date_format: String,
    /// Expanding one order collapses any other open order.
    pub exclusive_expansion: bool,
    pub actor_buffer: usize,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            row_height: 96.0,
            disclosure_duration_ms: 300,
            step_duration_ms: 500,
            frame_interval_ms: 16,
            delivery_lead_days: 5,
            currency_symbol: "$".to_string(),
            date_format: "%b %d, %Y".to_string(),
            exclusive_expansion: true,
            actor_buffer: 32,
        }
    }
}

impl TimelineConfig {
    pub fn disclosure_duration(&self) -> Duration {
        Duration::from_millis(self.disclosure_duration_ms)
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(ConfigError::Validation(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        if self.disclosure_duration_ms == 0 {
            return Err(ConfigError::Validation(
                "disclosure_duration_ms must be positive".into(),
            ));
        }
        if self.step_duration_ms == 0 {
            return Err(ConfigError::Validation(
                "step_duration_ms must be positive".into(),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "frame_interval_ms must be positive".into(),
            ));
        }
        if !(0..=365).contains(&self.delivery_lead_days) {
            return Err(ConfigError::Validation(format!(
                "delivery_lead_days must be within 0..=365, got {}",
                self.delivery_lead_days
            )));
        }
        if !is_valid_date_format(&self.date_format) {
            return Err(ConfigError::Validation(format!(
                "date_format is not a valid format string: {:?}",
                self.date_format
            )));
        }
        if self.actor_buffer == 0 {
            return Err(ConfigError::Validation(
                "actor_buffer must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Reads, parses and validates a TOML config file.
pub fn load_config(path: impl AsRef<Path>) -> Result<TimelineConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let config = TimelineConfig::from_toml_str(&text)?;
    info!(path = %path.display(), "Loaded timeline config");
    Ok(config)
}
