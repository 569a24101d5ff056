//! Identifier types for the routine domain.

use crate::identifier::uuid_identifier;

uuid_identifier! {
    /// Unique identifier for a routine.
    RoutineId
}
