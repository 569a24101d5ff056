//! Routine selection, filtering and orchestration services.

mod determiner;
mod filter;
mod routine;

pub use determiner::ActiveRoutineDeterminer;
pub use filter::RoutineTaskFilter;
pub use routine::{RoutineService, RoutineServiceError, RoutineServiceResult};
