//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod recurrence;
pub mod repository;

pub use recurrence::{RecurrenceCalculator, RecurrenceError, RuleValidation};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
