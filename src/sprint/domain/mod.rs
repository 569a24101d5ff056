//! Domain model for weekly sprints.

mod error;
mod ids;
mod sprint;

pub use error::SprintDomainError;
pub use ids::SprintId;
pub use sprint::Sprint;
