//! In-memory adapters for routine tests and embedding.

mod routine;

pub use routine::InMemoryRoutineRepository;
