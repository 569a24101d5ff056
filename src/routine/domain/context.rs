//! Contexts handed to the expression evaluator.
//!
//! Expressions see a flat map of named values. Two builders produce the
//! maps routines are evaluated against: [`ActivationContext`] derives
//! calendar facts from a local timestamp, and [`TaskFilterContext`]
//! describes a single task.

use crate::tag::domain::{Tag, TagId};
use crate::task::domain::Task;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Key holding the tag names consulted by the tag predicates.
pub const TAGS_KEY: &str = "tags";

/// A single value visible to expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Text.
    Text(String),
    /// List of strings.
    List(Vec<String>),
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ContextValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for ContextValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Named values an expression is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationContext {
    values: BTreeMap<String, ContextValue>,
}

impl EvaluationContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Adds or replaces a value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    /// Returns a boolean value, if `key` holds one.
    #[must_use]
    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(ContextValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns an integer value, if `key` holds one.
    #[must_use]
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(ContextValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns a text value, if `key` holds one.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(ContextValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Iterates over every key and value in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the tag names under the `tags` key; empty when absent.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        match self.get(TAGS_KEY) {
            Some(ContextValue::List(tags)) => tags,
            _ => &[],
        }
    }

    /// `hasTag(name)`: whether the context carries `name`, ignoring case.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        let wanted = name.trim();
        self.tags().iter().any(|tag| tag.eq_ignore_ascii_case(wanted))
    }

    /// `hasAnyTag(names)`: whether at least one of `names` is present.
    #[must_use]
    pub fn has_any_tag<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|name| self.has_tag(name.as_ref()))
    }

    /// `hasAllTags(names)`: whether every one of `names` is present.
    ///
    /// An empty `names` list is vacuously satisfied.
    #[must_use]
    pub fn has_all_tags<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().all(|name| self.has_tag(name.as_ref()))
    }
}

/// Builds activation contexts from a local timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivationContext;

impl ActivationContext {
    /// Describes `now` for activation expressions.
    ///
    /// Keys: `hour`, `minute`, `dayOfWeek` (0 = Sunday), `isSunday` through
    /// `isSaturday`, `isWeekday`, `isWeekend`, `date` (`YYYY-MM-DD`),
    /// `time` (`HH:MM`) and an empty `tags` list.
    #[must_use]
    pub fn at(now: NaiveDateTime) -> EvaluationContext {
        let weekday = now.weekday();
        let is_weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);

        let mut context = EvaluationContext::new()
            .with("hour", now.hour())
            .with("minute", now.minute())
            .with("dayOfWeek", weekday.num_days_from_sunday())
            .with("isWeekday", !is_weekend)
            .with("isWeekend", is_weekend)
            .with("date", now.format("%Y-%m-%d").to_string())
            .with("time", now.format("%H:%M").to_string())
            .with(TAGS_KEY, Vec::<String>::new());

        for (key, day) in [
            ("isSunday", Weekday::Sun),
            ("isMonday", Weekday::Mon),
            ("isTuesday", Weekday::Tue),
            ("isWednesday", Weekday::Wed),
            ("isThursday", Weekday::Thu),
            ("isFriday", Weekday::Fri),
            ("isSaturday", Weekday::Sat),
        ] {
            context.insert(key, weekday == day);
        }
        context
    }
}

/// Builds task filter contexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilterContext;

impl TaskFilterContext {
    /// Describes `task` for filter expressions.
    ///
    /// Keys: `title`, `status`, `location` (`backlog` or `sprint`),
    /// `points` (total), `tags` (names of catalogued tags carrying points),
    /// `isTemplate` and `isSkipped`.
    #[must_use]
    pub fn for_task(task: &Task, catalogue: &[Tag]) -> EvaluationContext {
        let names: HashMap<TagId, &str> = catalogue
            .iter()
            .map(|tag| (tag.id(), tag.name().as_str()))
            .collect();
        let tags: Vec<String> = task
            .tag_points()
            .tags()
            .filter_map(|tag_id| names.get(&tag_id).map(|name| (*name).to_owned()))
            .collect();
        let points = i64::try_from(task.tag_points().total()).unwrap_or(i64::MAX);

        EvaluationContext::new()
            .with("title", task.title())
            .with("status", task.status().as_str())
            .with("location", task.location().kind())
            .with("points", points)
            .with(TAGS_KEY, tags)
            .with("isTemplate", task.is_template())
            .with("isSkipped", task.skip_state().is_some())
    }
}
