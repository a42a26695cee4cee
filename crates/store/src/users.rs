use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{User, UserError, UserRepository};
use tokio::sync::RwLock;

/// In-memory user store keyed by email.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn save_user(&self, user: User) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .insert(user.email().to_string(), user);
        Ok(())
    }

    async fn get_user(&self, email: &str) -> Result<User, UserError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(UserError::UserNotFound)
    }
}
