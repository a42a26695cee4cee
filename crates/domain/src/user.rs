//! Users who place orders.

use async_trait::async_trait;
use common::UserId;
use serde::Serialize;
use thiserror::Error;
use validator::ValidateEmail;

use crate::error::ErrorKind;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("invalid user: invalid email {0:?}")]
    InvalidEmail(String),

    #[error("user not found")]
    UserNotFound,
}

impl UserError {
    /// Returns the root cause category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::InvalidEmail(_) => ErrorKind::InvalidUser,
            UserError::UserNotFound => ErrorKind::UserNotFound,
        }
    }
}

/// A registered user, identified for ordering by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    email: String,
}

impl User {
    /// Builds a user, rejecting syntactically invalid emails.
    pub fn new(id: UserId, email: impl Into<String>) -> Result<Self, UserError> {
        let email: String = email.into();
        if !email.validate_email() {
            return Err(UserError::InvalidEmail(email));
        }
        Ok(Self { id, email })
    }

    /// Builds a user with a fresh identifier.
    pub fn create(email: impl Into<String>) -> Result<Self, UserError> {
        Self::new(UserId::new(), email)
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Storage port for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a user keyed by email, replacing any user with that email.
    async fn save_user(&self, user: User) -> Result<(), UserError>;

    /// Looks up a user by email.
    async fn get_user(&self, email: &str) -> Result<User, UserError>;
}
