//! Driving port for logging exercises against a user.

use async_trait::async_trait;

use crate::domain::{Error, Exercise, ExerciseDraft, User, UserId};

/// Request to log an exercise for an existing user.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExerciseRequest {
    pub user_id: UserId,
    pub draft: ExerciseDraft,
}

/// Stored exercise together with its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedExercise {
    pub user: User,
    pub exercise: Exercise,
}

/// Driving port for exercise write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseCommand: Send + Sync {
    /// Validate and store an exercise.
    ///
    /// Unknown users yield a `not_found` error before the payload is
    /// inspected. Invalid payloads and storage failures are internal errors.
    async fn add_exercise(&self, request: AddExerciseRequest) -> Result<LoggedExercise, Error>;
}
