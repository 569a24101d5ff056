//! In-memory adapters for the tag catalogue.

mod tag;

pub use tag::InMemoryTagRepository;
