//! Sprint health and planning services.

mod health;
mod planning;

pub use health::{HealthStatus, SprintHealthCalculator, SprintHealthReport, TagHealth};
pub use planning::{SprintPlanningError, SprintPlanningResult, SprintPlanningService};
