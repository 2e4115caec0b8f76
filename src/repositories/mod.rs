//! Repository layer for data access operations.
//!
//! `UserStore` is the seam between the HTTP layer and PostgreSQL;
//! `UserRepository` is the diesel-async implementation.

#[cfg(test)]
pub(crate) mod memory_repo;
mod traits;
mod user_repo;

pub use traits::UserStore;
pub use user_repo::UserRepository;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap; each store sits behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserStore>,
}

impl Repositories {
    /// Creates the PostgreSQL-backed repositories over the given pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool)),
        }
    }

    /// Wraps an already constructed user store.
    pub fn with_user_store(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
