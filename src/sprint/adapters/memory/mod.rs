//! In-memory adapters for sprint planning tests and embedding.

mod sprint;

pub use sprint::InMemorySprintRepository;
