//! Tag aggregate root.

use super::{TagDomainError, TagId};
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAME_LENGTH: usize = 50;

/// Trimmed, non-empty tag display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    /// Creates a validated tag name.
    ///
    /// # Errors
    ///
    /// Returns [`TagDomainError::EmptyTagName`] when the value is blank or
    /// [`TagDomainError::TagNameTooLong`] when it exceeds 50 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TagDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TagDomainError::EmptyTagName);
        }
        if normalized.chars().count() > MAX_NAME_LENGTH {
            return Err(TagDomainError::TagNameTooLong {
                name: raw,
                max: MAX_NAME_LENGTH,
            });
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this name matches `other`, ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl TryFrom<String> for TagName {
    type Error = TagDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TagName> for String {
    fn from(value: TagName) -> Self {
        value.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tag with its default sprint capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    name: TagName,
    color: Option<String>,
    default_capacity: u32,
}

impl Tag {
    /// Creates a tag with the given per-sprint point capacity.
    ///
    /// # Errors
    ///
    /// Returns [`TagDomainError`] when the name fails validation.
    pub fn create(name: impl Into<String>, default_capacity: u32) -> Result<Self, TagDomainError> {
        Ok(Self {
            id: TagId::new(),
            name: TagName::new(name)?,
            color: None,
            default_capacity,
        })
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.set_color(Some(color.into()));
        self
    }

    /// Returns the tag identifier.
    #[must_use]
    pub const fn id(&self) -> TagId {
        self.id
    }

    /// Returns the tag name.
    #[must_use]
    pub const fn name(&self) -> &TagName {
        &self.name
    }

    /// Returns the display color, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the default per-sprint point capacity.
    #[must_use]
    pub const fn default_capacity(&self) -> u32 {
        self.default_capacity
    }

    /// Renames the tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagDomainError`] when the new name fails validation; the
    /// tag is left unchanged.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TagDomainError> {
        self.name = TagName::new(name)?;
        Ok(())
    }

    /// Replaces the default per-sprint capacity.
    pub const fn set_default_capacity(&mut self, capacity: u32) {
        self.default_capacity = capacity;
    }

    /// Replaces the display color; blank values clear it.
    pub fn set_color(&mut self, color: Option<String>) {
        self.color = color
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
    }
}
