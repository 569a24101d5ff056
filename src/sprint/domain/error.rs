//! Error types for sprint construction and capacity rules.

use crate::error::ErrorKind;
use chrono::{NaiveDate, Weekday};
use thiserror::Error;

/// Errors returned by sprint construction and sprint operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SprintDomainError {
    /// A sprint identifier was blank.
    #[error("sprint id must not be empty")]
    EmptySprintId,

    /// A sprint identifier was not a UUID.
    #[error("invalid sprint id '{value}': {reason}")]
    InvalidSprintId {
        /// Rejected input.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The start date does not fall on a Sunday.
    #[error("sprint must start on a Sunday, {date} is a {weekday}")]
    NotSunday {
        /// Rejected start date.
        date: NaiveDate,
        /// Actual weekday of the date.
        weekday: Weekday,
    },

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date '{value}': {reason}")]
    InvalidDate {
        /// Rejected input.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The sprint window would leave the supported calendar range.
    #[error("sprint window around {0} is outside the supported date range")]
    DateOutOfRange(NaiveDate),
}

impl SprintDomainError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySprintId
            | Self::InvalidSprintId { .. }
            | Self::NotSunday { .. }
            | Self::InvalidDate { .. }
            | Self::DateOutOfRange(_) => ErrorKind::Validation,
        }
    }
}
