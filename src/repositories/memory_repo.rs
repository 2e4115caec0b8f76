//! In-process `UserStore` implementations used by handler and service tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::UserStore;

/// Vec-backed store that hands out ids from a sequence starting at 1,
/// like a PostgreSQL SERIAL column.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    rows: Vec<User>,
    last_id: i32,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_all(&self) -> AppResult<Vec<User>> {
        let state = self.inner.lock().expect("memory store poisoned");
        Ok(state.rows.clone())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut state = self.inner.lock().expect("memory store poisoned");
        state.last_id += 1;
        let user = new_user.with_id(state.last_id);
        state.rows.push(user.clone());
        Ok(user)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Store whose every call fails the way a dropped connection does.
pub struct FailingUserStore {
    message: String,
}

impl FailingUserStore {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    fn error(&self, operation: &str) -> AppError {
        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!(self.message.clone()),
        }
    }
}

#[async_trait]
impl UserStore for FailingUserStore {
    async fn list_all(&self) -> AppResult<Vec<User>> {
        Err(self.error("list users"))
    }

    async fn create(&self, _new_user: NewUser) -> AppResult<User> {
        Err(self.error("insert user"))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::ConnectionPool {
            source: anyhow::anyhow!(self.message.clone()),
        })
    }
}
