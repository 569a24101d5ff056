//! Routine aggregate root.

use super::{RoutineDomainError, RoutineId};
use serde::{Deserialize, Serialize};

pub(crate) const TASK_FILTER_FIELD: &str = "task filter";
pub(crate) const ACTIVATION_FIELD: &str = "activation";

/// A named, prioritised task view with an activation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    id: RoutineId,
    name: String,
    icon: Option<String>,
    color: Option<String>,
    priority: i32,
    task_filter_expression: String,
    activation_expression: String,
}

/// Parameter object for creating a routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineDraft {
    name: String,
    task_filter_expression: String,
    activation_expression: String,
    icon: Option<String>,
    color: Option<String>,
    priority: i32,
}

impl RoutineDraft {
    /// Creates a draft with the required fields and priority zero.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        task_filter_expression: impl Into<String>,
        activation_expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            task_filter_expression: task_filter_expression.into(),
            activation_expression: activation_expression.into(),
            icon: None,
            color: None,
            priority: 0,
        }
    }

    /// Sets the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the priority; higher wins.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the task filter expression.
    #[must_use]
    pub fn task_filter_expression(&self) -> &str {
        &self.task_filter_expression
    }

    /// Returns the activation expression.
    #[must_use]
    pub fn activation_expression(&self) -> &str {
        &self.activation_expression
    }
}

impl Routine {
    /// Creates a routine.
    ///
    /// Expressions are only checked for emptiness here; syntax belongs to
    /// the evaluator port.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::EmptyName`] or
    /// [`RoutineDomainError::EmptyExpression`] for blank input.
    pub fn create(draft: RoutineDraft) -> Result<Self, RoutineDomainError> {
        let RoutineDraft {
            name,
            task_filter_expression,
            activation_expression,
            icon,
            color,
            priority,
        } = draft;

        Ok(Self {
            id: RoutineId::new(),
            name: normalize_name(&name)?,
            icon: icon.as_deref().and_then(normalize_optional),
            color: color.as_deref().and_then(normalize_optional),
            priority,
            task_filter_expression: normalize_expression(&task_filter_expression, TASK_FILTER_FIELD)?,
            activation_expression: normalize_expression(&activation_expression, ACTIVATION_FIELD)?,
        })
    }

    /// Returns the routine identifier.
    #[must_use]
    pub const fn id(&self) -> RoutineId {
        self.id
    }

    /// Returns the routine name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the icon, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the display color, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Returns the priority; higher wins.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the task filter expression.
    #[must_use]
    pub fn task_filter_expression(&self) -> &str {
        &self.task_filter_expression
    }

    /// Returns the activation expression.
    #[must_use]
    pub fn activation_expression(&self) -> &str {
        &self.activation_expression
    }

    /// Renames the routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::EmptyName`] for a blank name.
    pub fn rename(&mut self, name: &str) -> Result<(), RoutineDomainError> {
        self.name = normalize_name(name)?;
        Ok(())
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    /// Replaces the icon; blank values clear it.
    pub fn set_icon(&mut self, icon: Option<&str>) {
        self.icon = icon.and_then(normalize_optional);
    }

    /// Replaces the display color; blank values clear it.
    pub fn set_color(&mut self, color: Option<&str>) {
        self.color = color.and_then(normalize_optional);
    }

    /// Replaces the task filter expression.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::EmptyExpression`] for blank input.
    pub fn update_task_filter(&mut self, expression: &str) -> Result<(), RoutineDomainError> {
        self.task_filter_expression = normalize_expression(expression, TASK_FILTER_FIELD)?;
        Ok(())
    }

    /// Replaces the activation expression.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::EmptyExpression`] for blank input.
    pub fn update_activation(&mut self, expression: &str) -> Result<(), RoutineDomainError> {
        self.activation_expression = normalize_expression(expression, ACTIVATION_FIELD)?;
        Ok(())
    }
}

fn normalize_name(name: &str) -> Result<String, RoutineDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RoutineDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn normalize_expression(
    expression: &str,
    field: &'static str,
) -> Result<String, RoutineDomainError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(RoutineDomainError::EmptyExpression { field });
    }
    Ok(trimmed.to_owned())
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
