//! User service for business logic operations.
//!
//! There is deliberately no business rule here beyond logging: no
//! uniqueness check, no password hashing, no field validation.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{NewUser, User};
use crate::repositories::UserStore;

/// User service wrapping a shared `UserStore`.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Lists all users in storage order.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.store.list_all().await.inspect_err(|e| {
            tracing::error!(error = %e.root_message(), "Error fetching users");
        })
    }

    /// Creates a new user.
    ///
    /// # Returns
    /// The stored user carrying its freshly assigned id
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let user = self.store.create(new_user).await.inspect_err(|e| {
            tracing::error!(error = %e.root_message(), "Error creating user");
        })?;
        tracing::debug!(user_id = user.id, "User created");
        Ok(user)
    }

    /// Checks that storage is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
