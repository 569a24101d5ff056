//! Sprint aggregate root.

use super::{SprintDomainError, SprintId};
use crate::tag::domain::TagId;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SPRINT_LENGTH_DAYS: u64 = 6;

/// A Sunday-to-Saturday scheduling window.
///
/// The end date is always derived from the start date and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SprintRecord", into = "SprintRecord")]
pub struct Sprint {
    id: SprintId,
    start_date: NaiveDate,
    capacity_overrides: BTreeMap<TagId, u32>,
}

/// Serialized sprint shape; deserialization re-runs construction checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SprintRecord {
    id: SprintId,
    start_date: NaiveDate,
    #[serde(default)]
    capacity_overrides: BTreeMap<TagId, u32>,
}

impl Sprint {
    /// Creates a sprint starting on `start_date`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::NotSunday`] unless `start_date` is a
    /// Sunday and [`SprintDomainError::DateOutOfRange`] when the end date
    /// cannot be represented.
    pub fn create(start_date: NaiveDate) -> Result<Self, SprintDomainError> {
        Self::with_id(SprintId::new(), start_date, BTreeMap::new())
    }

    /// Creates a sprint from a `YYYY-MM-DD` start date.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidDate`] for malformed input and
    /// otherwise the same errors as [`Self::create`].
    pub fn parse(start_date: &str) -> Result<Self, SprintDomainError> {
        Self::create(parse_date(start_date)?)
    }

    /// Creates the sprint whose week contains `date`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::DateOutOfRange`] near the calendar
    /// limits.
    pub fn for_date(date: NaiveDate) -> Result<Self, SprintDomainError> {
        Self::create(Self::week_start(date)?)
    }

    /// Returns the Sunday on or before `date`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::DateOutOfRange`] when that Sunday cannot
    /// be represented.
    pub fn week_start(date: NaiveDate) -> Result<NaiveDate, SprintDomainError> {
        let offset = u64::from(date.weekday().num_days_from_sunday());
        date.checked_sub_days(Days::new(offset))
            .ok_or(SprintDomainError::DateOutOfRange(date))
    }

    fn with_id(
        id: SprintId,
        start_date: NaiveDate,
        capacity_overrides: BTreeMap<TagId, u32>,
    ) -> Result<Self, SprintDomainError> {
        let weekday = start_date.weekday();
        if weekday != Weekday::Sun {
            return Err(SprintDomainError::NotSunday {
                date: start_date,
                weekday,
            });
        }
        if start_date
            .checked_add_days(Days::new(SPRINT_LENGTH_DAYS))
            .is_none()
        {
            return Err(SprintDomainError::DateOutOfRange(start_date));
        }
        Ok(Self {
            id,
            start_date,
            capacity_overrides,
        })
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the first day (Sunday) of the sprint.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day (Saturday) of the sprint.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.start_date
            .checked_add_days(Days::new(SPRINT_LENGTH_DAYS))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns every capacity override.
    #[must_use]
    pub const fn capacity_overrides(&self) -> &BTreeMap<TagId, u32> {
        &self.capacity_overrides
    }

    /// Returns the override for `tag_id`, if any.
    #[must_use]
    pub fn capacity_override(&self, tag_id: TagId) -> Option<u32> {
        self.capacity_overrides.get(&tag_id).copied()
    }

    /// Returns the effective capacity for a tag with `default_capacity`.
    #[must_use]
    pub fn capacity_for(&self, tag_id: TagId, default_capacity: u32) -> u32 {
        self.capacity_override(tag_id).unwrap_or(default_capacity)
    }

    /// Overrides a tag's capacity for this sprint only.
    pub fn set_capacity_override(&mut self, tag_id: TagId, capacity: u32) {
        self.capacity_overrides.insert(tag_id, capacity);
    }

    /// Removes a tag's override, returning the previous value.
    pub fn clear_capacity_override(&mut self, tag_id: TagId) -> Option<u32> {
        self.capacity_overrides.remove(&tag_id)
    }

    /// Returns whether `date` falls within the sprint.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date()
    }

    /// Returns whether the sprint has not started by `today`.
    #[must_use]
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.start_date > today
    }

    /// Returns whether the sprint ended before `today`.
    #[must_use]
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.end_date() < today
    }
}

impl TryFrom<SprintRecord> for Sprint {
    type Error = SprintDomainError;

    fn try_from(record: SprintRecord) -> Result<Self, Self::Error> {
        Self::with_id(record.id, record.start_date, record.capacity_overrides)
    }
}

impl From<Sprint> for SprintRecord {
    fn from(sprint: Sprint) -> Self {
        Self {
            id: sprint.id,
            start_date: sprint.start_date,
            capacity_overrides: sprint.capacity_overrides,
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, SprintDomainError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|err| {
        SprintDomainError::InvalidDate {
            value: trimmed.to_owned(),
            reason: err.to_string(),
        }
    })
}
