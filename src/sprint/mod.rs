//! Weekly sprints and capacity health.
//!
//! A sprint is a fixed Sunday-to-Saturday window. Each tag has a default
//! per-sprint capacity which a sprint may override; the health calculator
//! compares scheduled points against that capacity.
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
