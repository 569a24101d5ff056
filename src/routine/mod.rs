//! Routines: named, prioritised views over the task list.
//!
//! A routine pairs a task filter expression (which tasks belong to the
//! view) with an activation expression (when the view is live). Both are
//! opaque strings interpreted by an external engine behind
//! [`ports::ExpressionEvaluator`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
