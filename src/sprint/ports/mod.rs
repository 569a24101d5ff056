//! Port contracts for sprint planning.

pub mod repository;

pub use repository::{SprintRepository, SprintRepositoryError, SprintRepositoryResult};
