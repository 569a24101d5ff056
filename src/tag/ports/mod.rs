//! Port contracts for the tag catalogue.

pub mod repository;

pub use repository::{TagRepository, TagRepositoryError, TagRepositoryResult};
