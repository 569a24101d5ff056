//! Error types for tag validation.

use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or updating tags.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagDomainError {
    /// The tag name is empty after trimming.
    #[error("tag name must not be empty")]
    EmptyTagName,

    /// The tag name exceeds the length limit.
    #[error("tag name exceeds {max} character limit: {name}")]
    TagNameTooLong {
        /// Rejected name.
        name: String,
        /// Maximum accepted length.
        max: usize,
    },
}

impl TagDomainError {
    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTagName | Self::TagNameTooLong { .. } => ErrorKind::Validation,
        }
    }
}
