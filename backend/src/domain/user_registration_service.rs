//! User registration and listing services.
//!
//! Implements the [`UsersCommand`] and [`UsersQuery`] driving ports on top of
//! a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{
    CreateUserRequest, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{Error, User, Username};

pub(crate) const SAVE_USER_FAILED: &str = "Failed to save user";
pub(crate) const LIST_USERS_FAILED: &str = "Failed to retrieve users";

/// Service registering and listing users.
#[derive(Clone)]
pub struct UserRegistrationService<U> {
    user_repo: Arc<U>,
}

impl<U> UserRegistrationService<U> {
    /// Create a new service with the given repository.
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

impl<U> UserRegistrationService<U>
where
    U: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError, message: &'static str) -> Error {
        error!(%error, "user repository failure");
        Error::internal(message)
    }
}

#[async_trait]
impl<U> UsersCommand for UserRegistrationService<U>
where
    U: UserRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let username = Username::new(request.username.unwrap_or_default()).map_err(|err| {
            warn!(error = %err, "rejected user registration");
            Error::internal(SAVE_USER_FAILED)
        })?;
        let user = User::register(username);
        self.user_repo
            .insert(&user)
            .await
            .map_err(|err| Self::map_persistence_error(err, SAVE_USER_FAILED))?;
        Ok(user)
    }
}

#[async_trait]
impl<U> UsersQuery for UserRegistrationService<U>
where
    U: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .list_all()
            .await
            .map_err(|err| Self::map_persistence_error(err, LIST_USERS_FAILED))
    }
}

#[cfg(test)]
#[path = "user_registration_service_tests.rs"]
mod tests;
