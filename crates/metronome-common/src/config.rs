//! Configuration structures for the tick schedulers.
//!
//! Supports TOML deserialization with sensible defaults for
//! development and explicit values for production deployment.

use crate::error::{SchedError, SchedResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Scheduler configuration.
///
/// The `coefficient` is optional: when absent, each scheduler variant applies
/// its own default (1.5 for a single-source tracker, 1.1 for the two-source
/// scheduler).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Target tick interval.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,

    /// Drift tolerance multiplier; the drift threshold is
    /// `coefficient * interval`.
    pub coefficient: Option<f64>,

    /// Which time source(s) the embedding application should wire up.
    pub clock: ClockSelection,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            coefficient: None,
            clock: ClockSelection::default(),
        }
    }
}

/// Time-source selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockSelection {
    /// Monotonic counter cross-checked against the wall clock.
    #[default]
    Dual,
    /// Monotonic counter only.
    Monotonic,
    /// Wall clock only.
    Wall,
}

impl SchedulerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Fail fast on values no scheduler constructor would accept.
    ///
    /// # Errors
    ///
    /// Returns [`SchedError::InvalidConfiguration`] if the interval is zero
    /// or the coefficient is non-positive or non-finite.
    pub fn validate(&self) -> SchedResult<()> {
        if self.interval.is_zero() {
            return Err(SchedError::InvalidConfiguration {
                parameter: "interval",
                value: 0.0,
            });
        }
        if let Some(coefficient) = self.coefficient {
            if !coefficient.is_finite() || coefficient <= 0.0 {
                return Err(SchedError::InvalidConfiguration {
                    parameter: "coefficient",
                    value: coefficient,
                });
            }
        }
        Ok(())
    }

    /// Target interval in seconds, the unit the scheduler core works in.
    #[must_use]
    pub fn interval_secs(&self) -> f64 {
        self.interval.as_secs_f64()
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Serde helper module for `Duration` using humantime format.
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = humantime::format_duration(*duration).to_string();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
