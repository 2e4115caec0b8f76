//! Storage abstraction for user records.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewUser, User};

/// Read/insert access to the users table.
///
/// Uses `async_trait` so handlers can hold `Arc<dyn UserStore>`.
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every stored user in whatever order the backend yields them.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Inserts `new_user` and returns it with the storage-assigned id.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Cheap round trip proving the backend is reachable.
    async fn ping(&self) -> AppResult<()>;
}
