//! Error taxonomy shared by the domain error types.
//!
//! Each bounded context defines its own `thiserror` enum; every variant maps
//! onto one [`ErrorKind`] so callers (RPC handlers, CLIs) can translate
//! failures without matching on context-specific variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad classification of a domain failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// An entity lookup missed.
    NotFound,
    /// Input failed validation.
    Validation,
    /// A status or skip-state rule was violated.
    InvalidTransition,
    /// The operation is never permitted on the target.
    Forbidden,
}

impl ErrorKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::InvalidTransition => "invalid_transition",
            Self::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
