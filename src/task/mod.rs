//! Task lifecycle management.
//!
//! Tasks are the aggregate root of the planner: they own their focus
//! sessions, comments, skip state and location, and enforce every
//! lifecycle rule. Two stateless services sit on top of the aggregate:
//! focus ordering (which task to work on next) and the lifecycle service
//! that loads, mutates and persists tasks through the repository port.
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
