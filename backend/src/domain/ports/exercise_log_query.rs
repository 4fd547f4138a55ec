//! Driving port for reading a user's exercise log.

use async_trait::async_trait;

use crate::domain::{Error, Exercise, User, UserId};

/// Raw log query as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLogRequest {
    pub user_id: UserId,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// A user's exercises after filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLog {
    pub user: User,
    pub entries: Vec<Exercise>,
}

impl ExerciseLog {
    /// Number of entries returned.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Driving port for exercise log reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogQuery: Send + Sync {
    /// Fetch the filtered exercise log for a user.
    async fn fetch_log(&self, request: ExerciseLogRequest) -> Result<ExerciseLog, Error>;
}
