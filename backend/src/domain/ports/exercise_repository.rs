//! Port for exercise persistence and filtered log reads.

use async_trait::async_trait;

use crate::domain::{Exercise, ExerciseLogFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exercise repository adapters.
    pub enum ExercisePersistenceError {
        /// Repository connection could not be established.
        Connection => "exercise repository connection failed",
        /// Query or mutation failed during execution.
        Query => "exercise repository query failed",
    }
}

/// Port for writing exercises and reading a user's log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Persist a validated exercise.
    async fn insert(&self, exercise: &Exercise) -> Result<(), ExercisePersistenceError>;

    /// Exercises owned by `user_id` that pass `filter`, in storage order and
    /// truncated to the filter's limit.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &ExerciseLogFilter,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError>;
}
