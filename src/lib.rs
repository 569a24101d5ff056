//! Sprintwise: the core of a weekly sprint task tracker.
//!
//! Work is estimated in Fibonacci points per tag and scheduled into
//! Sunday-to-Saturday sprints. The crate decides what to work on next,
//! whether each sprint is over capacity, and which routine view is live.
//!
//! # Architecture
//!
//! Every bounded context follows the same hexagonal layout:
//!
//! - **Domain**: aggregates and value types with no infrastructure
//!   dependencies
//! - **Ports**: trait interfaces for persistence and external engines
//! - **Adapters**: in-memory implementations of the repository ports
//! - **Services**: async orchestration over ports
//!
//! # Modules
//!
//! - [`task`]: task lifecycle, sessions, comments and focus ordering
//! - [`sprint`]: weekly sprints, capacity overrides and health reports
//! - [`tag`]: the tag catalogue carrying default capacities
//! - [`routine`]: routines and active routine selection
//! - [`config`]: health thresholds and logging configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod error;
pub mod routine;
pub mod sprint;
pub mod tag;
pub mod task;
pub mod telemetry;

mod identifier;

#[cfg(test)]
mod test_support;
