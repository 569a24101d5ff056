//! Effort points and per-tag point allocations.

use super::TaskDomainError;
use crate::tag::domain::TagId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Effort estimate drawn from the Fibonacci scale (1, 2, 3, 5, 8, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Points(u32);

impl Points {
    /// Creates a validated point value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NonFibonacciPoints`] when `value` is not a
    /// member of the scale.
    pub const fn new(value: u32) -> Result<Self, TaskDomainError> {
        if !is_fibonacci(value) {
            return Err(TaskDomainError::NonFibonacciPoints(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Points {
    type Error = TaskDomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Points> for u32 {
    fn from(value: Points) -> Self {
        value.0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns whether `value` belongs to 1, 2, 3, 5, 8, 13, ...
const fn is_fibonacci(value: u32) -> bool {
    let mut current: u32 = 1;
    let mut next: u32 = 2;
    while current < value {
        let Some(following) = current.checked_add(next) else {
            return next == value;
        };
        current = next;
        next = following;
    }
    current == value
}

/// Point allocation per tag.
///
/// Immutable once built; updates replace the whole mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<TagId, u32>", into = "BTreeMap<TagId, u32>")]
pub struct TagPoints(BTreeMap<TagId, Points>);

impl TagPoints {
    /// Creates a validated allocation from raw point values.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTagPoints`] for the first value that
    /// is not on the Fibonacci scale.
    pub fn new(raw: impl IntoIterator<Item = (TagId, u32)>) -> Result<Self, TaskDomainError> {
        let mut allocation = BTreeMap::new();
        for (tag_id, value) in raw {
            let points = Points::new(value)
                .map_err(|_| TaskDomainError::InvalidTagPoints { tag_id, value })?;
            allocation.insert(tag_id, points);
        }
        Ok(Self(allocation))
    }

    /// Creates an allocation with no tags.
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the points allocated to `tag_id`, if any.
    #[must_use]
    pub fn points_for(&self, tag_id: TagId) -> Option<Points> {
        self.0.get(&tag_id).copied()
    }

    /// Iterates over tag allocations in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (TagId, Points)> + '_ {
        self.0.iter().map(|(tag_id, points)| (*tag_id, *points))
    }

    /// Iterates over the allocated tags.
    pub fn tags(&self) -> impl Iterator<Item = TagId> + '_ {
        self.0.keys().copied()
    }

    /// Returns the sum of all allocated points.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().map(|points| u64::from(points.value())).sum()
    }

    /// Returns whether no tags are allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of allocated tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<BTreeMap<TagId, u32>> for TagPoints {
    type Error = TaskDomainError;

    fn try_from(value: BTreeMap<TagId, u32>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TagPoints> for BTreeMap<TagId, u32> {
    fn from(value: TagPoints) -> Self {
        value
            .0
            .into_iter()
            .map(|(tag_id, points)| (tag_id, points.value()))
            .collect()
    }
}
