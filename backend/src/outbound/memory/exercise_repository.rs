//! In-memory `ExerciseRepository`.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{ExercisePersistenceError, ExerciseRepository};
use crate::domain::{Exercise, ExerciseLogFilter, UserId};

/// Exercises held in a process-local vector.
#[derive(Debug, Default)]
pub struct InMemoryExerciseRepository {
    exercises: RwLock<Vec<Exercise>>,
}

impl InMemoryExerciseRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ExercisePersistenceError {
    ExercisePersistenceError::query("in-memory exercise store lock poisoned")
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExercisePersistenceError> {
        let mut exercises = self.exercises.write().map_err(|_| poisoned())?;
        exercises.push(exercise.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &ExerciseLogFilter,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError> {
        let exercises = self.exercises.read().map_err(|_| poisoned())?;
        Ok(filter.apply(
            exercises
                .iter()
                .filter(|exercise| exercise.user_id().as_uuid() == user_id.as_uuid())
                .cloned(),
        ))
    }
}
