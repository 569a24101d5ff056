//! Recurrence calculator port.
//!
//! Recurrence rules are opaque strings to the task domain; an external
//! engine validates them and computes occurrences.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Outcome of validating a recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleValidation {
    /// The rule is well formed.
    Valid,
    /// The rule is malformed.
    Invalid {
        /// Engine-provided reason.
        reason: String,
    },
}

impl RuleValidation {
    /// Returns whether the rule is well formed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Errors raised by recurrence engines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The rule could not be interpreted.
    #[error("invalid recurrence rule '{rule}': {reason}")]
    InvalidRule {
        /// Offending rule.
        rule: String,
        /// Engine-provided reason.
        reason: String,
    },
}

/// Recurrence engine contract.
#[cfg_attr(test, mockall::automock)]
pub trait RecurrenceCalculator: Send + Sync {
    /// Checks whether `rule` is well formed.
    fn validate(&self, rule: &str) -> RuleValidation;

    /// Returns the first occurrence strictly after `after`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidRule`] when `rule` is malformed.
    fn next_occurrence(
        &self,
        rule: &str,
        after: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, RecurrenceError>;

    /// Returns every occurrence within `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidRule`] when `rule` is malformed.
    fn occurrences(
        &self,
        rule: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, RecurrenceError>;

    /// Returns a human-readable description of `rule`.
    ///
    /// # Errors
    ///
    /// Returns [`RecurrenceError::InvalidRule`] when `rule` is malformed.
    fn description(&self, rule: &str) -> Result<String, RecurrenceError>;
}
