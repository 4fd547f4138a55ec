//! Driving port for user registration.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Registration input as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Requested username; missing or blank names are rejected.
    pub username: Option<String>,
}

/// Domain use-case port for registering users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user under a fresh identifier and return the stored record.
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error>;
}
