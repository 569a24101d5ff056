//! Error types for routine validation and selection.

use super::RoutineId;
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned by routine construction and routine selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutineDomainError {
    /// The routine name is empty after trimming.
    #[error("routine name must not be empty")]
    EmptyName,

    /// An expression is empty after trimming.
    #[error("routine {field} expression must not be empty")]
    EmptyExpression {
        /// Which expression was blank.
        field: &'static str,
    },

    /// An explicitly requested routine does not exist.
    #[error("routine not found: {0}")]
    RoutineNotFound(RoutineId),
}

impl RoutineDomainError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyName | Self::EmptyExpression { .. } => ErrorKind::Validation,
            Self::RoutineNotFound(_) => ErrorKind::NotFound,
        }
    }
}
