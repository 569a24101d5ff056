//! Identifier types for the sprint domain.

use super::SprintDomainError;
use crate::identifier::uuid_identifier;
use std::str::FromStr;

uuid_identifier! {
    /// Unique identifier for a sprint.
    SprintId
}

impl SprintId {
    /// Parses an identifier from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptySprintId`] for blank input and
    /// [`SprintDomainError::InvalidSprintId`] when the value is not a UUID.
    pub fn parse(value: &str) -> Result<Self, SprintDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SprintDomainError::EmptySprintId);
        }
        uuid::Uuid::parse_str(trimmed)
            .map(Self::from_uuid)
            .map_err(|err| SprintDomainError::InvalidSprintId {
                value: trimmed.to_owned(),
                reason: err.to_string(),
            })
    }
}

impl FromStr for SprintId {
    type Err = SprintDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}
