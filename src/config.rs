//! Planner configuration.
//!
//! Sprint health thresholds and the tracing filter, loadable from TOML.
//!
//! # Examples
//!
//! ```
//! use sprintwise::config::{HealthThresholds, PlannerConfig};
//!
//! let config = PlannerConfig::default();
//! assert_eq!(config.health, HealthThresholds::default());
//!
//! let parsed = PlannerConfig::from_toml_str("[health]\nat_risk_percent = 75\n")
//!     .expect("valid configuration");
//! assert_eq!(parsed.health.at_risk_percent, 75);
//! assert_eq!(parsed.health.off_track_percent, 100);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "sprintwise=info";

/// Capacity ratios (in percent) at which a tag's sprint health degrades.
///
/// A tag is on track while `scheduled / capacity` stays at or below
/// `at_risk_percent`, at risk up to and including `off_track_percent`, and
/// off track beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    /// Ratio above which a tag is at risk.
    pub at_risk_percent: u32,
    /// Ratio above which a tag is off track.
    pub off_track_percent: u32,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            at_risk_percent: 85,
            off_track_percent: 100,
        }
    }
}

impl HealthThresholds {
    /// Creates validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThresholds`] when either value is zero
    /// or the at-risk threshold is not below the off-track threshold.
    pub fn new(at_risk_percent: u32, off_track_percent: u32) -> Result<Self, ConfigError> {
        let thresholds = Self {
            at_risk_percent,
            off_track_percent,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Thresholds that flag overcommitment earlier.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            at_risk_percent: 70,
            off_track_percent: 90,
        }
    }

    /// Thresholds that tolerate a modest overbooking.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            at_risk_percent: 100,
            off_track_percent: 120,
        }
    }

    /// Checks the threshold ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidThresholds`] when the thresholds are
    /// zero or out of order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.at_risk_percent == 0 || self.at_risk_percent >= self.off_track_percent {
            return Err(ConfigError::InvalidThresholds {
                at_risk_percent: self.at_risk_percent,
                off_track_percent: self.off_track_percent,
            });
        }
        Ok(())
    }
}

/// Top-level planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Sprint health thresholds.
    pub health: HealthThresholds,
    /// `tracing` filter directive used by [`crate::telemetry::init_tracing`].
    pub log_filter: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            health: HealthThresholds::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl PlannerConfig {
    /// Parses and validates configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidThresholds`] for inconsistent thresholds.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.health.validate()?;
        Ok(config)
    }

    /// Reads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_path = path.as_ref();
        let raw = std::fs::read_to_string(file_path).map_err(|source| ConfigError::Io {
            path: file_path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Health thresholds are zero or out of order.
    #[error(
        "invalid health thresholds: at-risk {at_risk_percent}% must be non-zero and below off-track {off_track_percent}%"
    )]
    InvalidThresholds {
        /// Configured at-risk threshold.
        at_risk_percent: u32,
        /// Configured off-track threshold.
        off_track_percent: u32,
    },
}
