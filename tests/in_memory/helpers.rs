//! Shared fixtures and port implementations for in-memory integration tests.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use sprintwise::routine::{
    domain::EvaluationContext,
    ports::{CompiledExpression, ExpressionError, ExpressionEvaluator, ExpressionValidation},
};
use sprintwise::task::ports::{RecurrenceCalculator, RecurrenceError, RuleValidation};

/// Recurrence engine that understands `DAILY` and `WEEKLY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIntervalRecurrence;

impl FixedIntervalRecurrence {
    fn interval(rule: &str) -> Result<Duration, RecurrenceError> {
        match rule {
            "DAILY" => Ok(Duration::days(1)),
            "WEEKLY" => Ok(Duration::days(7)),
            other => Err(RecurrenceError::InvalidRule {
                rule: other.to_owned(),
                reason: "expected DAILY or WEEKLY".to_owned(),
            }),
        }
    }
}

impl RecurrenceCalculator for FixedIntervalRecurrence {
    fn validate(&self, rule: &str) -> RuleValidation {
        match Self::interval(rule) {
            Ok(_) => RuleValidation::Valid,
            Err(err) => RuleValidation::Invalid {
                reason: err.to_string(),
            },
        }
    }

    fn next_occurrence(
        &self,
        rule: &str,
        after: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, RecurrenceError> {
        Ok(Some(after + Self::interval(rule)?))
    }

    fn occurrences(
        &self,
        rule: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, RecurrenceError> {
        let step = Self::interval(rule)?;
        let mut found = Vec::new();
        let mut next = start;
        while next <= end {
            found.push(next);
            next += step;
        }
        Ok(found)
    }

    fn description(&self, rule: &str) -> Result<String, RecurrenceError> {
        Self::interval(rule)?;
        Ok(format!("repeats {}", rule.to_lowercase()))
    }
}

/// Evaluator for a small predicate vocabulary.
///
/// Understands `true`, `false`, boolean context keys such as `isWeekend`,
/// `hour >= N` and `hasTag('name')`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredicateEvaluator;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Literal(bool),
    Flag(String),
    HourAtLeast(i64),
    HasTag(String),
}

impl Predicate {
    fn parse(expression: &str) -> Result<Self, String> {
        let trimmed = expression.trim();
        match trimmed {
            "true" => return Ok(Self::Literal(true)),
            "false" => return Ok(Self::Literal(false)),
            _ => {}
        }
        if let Some(raw) = trimmed.strip_prefix("hour >=") {
            return raw
                .trim()
                .parse()
                .map(Self::HourAtLeast)
                .map_err(|err| format!("bad hour: {err}"));
        }
        if let Some(raw) = trimmed
            .strip_prefix("hasTag('")
            .and_then(|rest| rest.strip_suffix("')"))
        {
            return Ok(Self::HasTag(raw.to_owned()));
        }
        if !trimmed.is_empty() && trimmed.chars().all(char::is_alphanumeric) {
            return Ok(Self::Flag(trimmed.to_owned()));
        }
        Err(format!("unsupported expression: {trimmed}"))
    }

    fn evaluate(&self, context: &EvaluationContext) -> Result<bool, String> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Flag(key) => context
                .bool(key)
                .ok_or_else(|| format!("no boolean named {key}")),
            Self::HourAtLeast(threshold) => context
                .integer("hour")
                .map(|hour| hour >= *threshold)
                .ok_or_else(|| "no hour in context".to_owned()),
            Self::HasTag(name) => Ok(context.has_tag(name)),
        }
    }
}

struct CompiledPredicate {
    expression: String,
    predicate: Predicate,
}

impl CompiledExpression for CompiledPredicate {
    fn evaluate(&self, context: &EvaluationContext) -> Result<bool, ExpressionError> {
        self.predicate
            .evaluate(context)
            .map_err(|reason| ExpressionError::Evaluation {
                expression: self.expression.clone(),
                reason,
            })
    }
}

impl ExpressionEvaluator for PredicateEvaluator {
    fn validate(&self, expression: &str) -> ExpressionValidation {
        match Predicate::parse(expression) {
            Ok(_) => ExpressionValidation::Valid,
            Err(reason) => ExpressionValidation::Invalid { reason },
        }
    }

    fn compile(&self, expression: &str) -> Result<Box<dyn CompiledExpression>, ExpressionError> {
        let predicate = Predicate::parse(expression).map_err(|reason| ExpressionError::Invalid {
            expression: expression.to_owned(),
            reason,
        })?;
        Ok(Box::new(CompiledPredicate {
            expression: expression.to_owned(),
            predicate,
        }))
    }

    fn evaluate(
        &self,
        expression: &str,
        context: &EvaluationContext,
    ) -> Result<bool, ExpressionError> {
        self.compile(expression)?.evaluate(context)
    }
}

/// Provides a shared system clock.
#[fixture]
pub fn clock() -> Arc<DefaultClock> {
    Arc::new(DefaultClock)
}

/// Builds a calendar date.
///
/// # Panics
///
/// Panics when the date is invalid.
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Builds a local timestamp on the hour.
///
/// # Panics
///
/// Panics when the date or hour is invalid.
#[must_use]
pub fn local_time(day: NaiveDate, hour: u32) -> NaiveDateTime {
    day.and_time(NaiveTime::from_hms_opt(hour, 0, 0).expect("valid time"))
}
