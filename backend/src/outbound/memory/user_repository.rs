//! In-memory `UserRepository`.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

/// Users held in a process-local vector.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::query("in-memory user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        if users.iter().any(|stored| stored.id() == user.id()) {
            return Err(UserPersistenceError::query(format!(
                "duplicate user id {}",
                user.id()
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users
            .iter()
            .find(|user| user.id().as_uuid() == id.as_uuid())
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.clone())
    }
}
