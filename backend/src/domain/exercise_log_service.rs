//! Exercise logging and log retrieval services.
//!
//! Both operations resolve the owning user first; an unknown user is reported
//! as `not_found` regardless of the rest of the request.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, warn};

use crate::domain::ports::{
    AddExerciseRequest, ExerciseCommand, ExerciseLog, ExerciseLogQuery, ExerciseLogRequest,
    ExercisePersistenceError, ExerciseRepository, LoggedExercise, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Error, ExerciseLogFilter, User, UserId};

pub(crate) const USER_NOT_FOUND: &str = "User not found";
pub(crate) const SAVE_EXERCISE_FAILED: &str = "Failed to save exercise";
pub(crate) const FETCH_LOG_FAILED: &str = "Failed to retrieve exercises";

/// Service logging exercises and reading exercise logs.
#[derive(Clone)]
pub struct ExerciseLogService<U, E> {
    user_repo: Arc<U>,
    exercise_repo: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U, E> ExerciseLogService<U, E> {
    /// Create a new service; `clock` supplies the default exercise date.
    pub fn new(user_repo: Arc<U>, exercise_repo: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            exercise_repo,
            clock,
        }
    }
}

impl<U, E> ExerciseLogService<U, E>
where
    U: UserRepository,
    E: ExerciseRepository,
{
    fn map_user_error(error: UserPersistenceError, message: &'static str) -> Error {
        error!(%error, "user repository failure");
        Error::internal(message)
    }

    fn map_exercise_error(error: ExercisePersistenceError, message: &'static str) -> Error {
        error!(%error, "exercise repository failure");
        Error::internal(message)
    }

    async fn require_user(&self, user_id: &UserId, message: &'static str) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| Self::map_user_error(err, message))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<U, E> ExerciseCommand for ExerciseLogService<U, E>
where
    U: UserRepository,
    E: ExerciseRepository,
{
    async fn add_exercise(&self, request: AddExerciseRequest) -> Result<LoggedExercise, Error> {
        let AddExerciseRequest { user_id, draft } = request;
        let user = self.require_user(&user_id, SAVE_EXERCISE_FAILED).await?;

        let exercise = draft
            .validate(user.id().clone(), self.clock.utc())
            .map_err(|err| {
                warn!(error = %err, user_id = %user.id(), "rejected exercise");
                Error::internal(SAVE_EXERCISE_FAILED)
            })?;
        self.exercise_repo
            .insert(&exercise)
            .await
            .map_err(|err| Self::map_exercise_error(err, SAVE_EXERCISE_FAILED))?;

        Ok(LoggedExercise { user, exercise })
    }
}

#[async_trait]
impl<U, E> ExerciseLogQuery for ExerciseLogService<U, E>
where
    U: UserRepository,
    E: ExerciseRepository,
{
    async fn fetch_log(&self, request: ExerciseLogRequest) -> Result<ExerciseLog, Error> {
        let user = self.require_user(&request.user_id, FETCH_LOG_FAILED).await?;

        let filter = ExerciseLogFilter::from_params(
            request.from.as_deref(),
            request.to.as_deref(),
            request.limit.as_deref(),
        )
        .map_err(|err| {
            warn!(error = %err, user_id = %user.id(), "rejected log filter");
            Error::internal(FETCH_LOG_FAILED)
        })?;
        let entries = self
            .exercise_repo
            .list_for_user(user.id(), &filter)
            .await
            .map_err(|err| Self::map_exercise_error(err, FETCH_LOG_FAILED))?;

        Ok(ExerciseLog { user, entries })
    }
}

#[cfg(test)]
#[path = "exercise_log_service_tests.rs"]
mod tests;
