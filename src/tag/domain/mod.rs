//! Domain model for the tag catalogue.

mod error;
mod ids;
mod tag;

pub use error::TagDomainError;
pub use ids::TagId;
pub use tag::{Tag, TagName};
