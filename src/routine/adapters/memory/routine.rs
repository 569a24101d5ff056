//! In-memory repository for routines.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::routine::{
    domain::{Routine, RoutineId},
    ports::{RoutineRepository, RoutineRepositoryError, RoutineRepositoryResult},
};

/// Thread-safe in-memory routine repository.
///
/// Listings keep insertion order, which routine selection relies on to
/// break priority ties.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoutineRepository {
    state: Arc<RwLock<InMemoryRoutineState>>,
}

#[derive(Debug, Default)]
struct InMemoryRoutineState {
    routines: HashMap<RoutineId, Routine>,
    insertion_order: Vec<RoutineId>,
}

impl InMemoryRoutineState {
    fn ordered(&self) -> impl Iterator<Item = &Routine> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.routines.get(id))
    }
}

impl InMemoryRoutineRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> RoutineRepositoryError {
    RoutineRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RoutineRepository for InMemoryRoutineRepository {
    async fn save(&self, routine: &Routine) -> RoutineRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let name_taken = state.routines.values().any(|existing| {
            existing.id() != routine.id() && existing.name().eq_ignore_ascii_case(routine.name())
        });
        if name_taken {
            return Err(RoutineRepositoryError::DuplicateName(
                routine.name().to_owned(),
            ));
        }
        if state.routines.insert(routine.id(), routine.clone()).is_none() {
            state.insertion_order.push(routine.id());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: RoutineId) -> RoutineRepositoryResult<Option<Routine>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.routines.get(&id).cloned())
    }

    async fn find_all(&self) -> RoutineRepositoryResult<Vec<Routine>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.ordered().cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> RoutineRepositoryResult<Option<Routine>> {
        let state = self.state.read().map_err(lock_error)?;
        let wanted = name.trim();
        Ok(state
            .ordered()
            .find(|routine| routine.name().eq_ignore_ascii_case(wanted))
            .cloned())
    }

    async fn delete(&self, id: RoutineId) -> RoutineRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.routines.remove(&id).is_none() {
            return Err(RoutineRepositoryError::NotFound(id));
        }
        state.insertion_order.retain(|existing| *existing != id);
        Ok(())
    }
}
