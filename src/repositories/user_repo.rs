//! User repository for async database operations.
//!
//! Issues the two statements the service needs: a full-table SELECT and an
//! INSERT ... RETURNING id.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{self, AsyncDbPool};
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{NewUser, User};
use crate::repositories::UserStore;

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment).
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// `SELECT id, username, password FROM users`, no ORDER BY.
    async fn list_all(&self) -> AppResult<Vec<User>> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        users
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list users"))
    }

    /// `INSERT INTO users (username, password) VALUES ($1, $2) RETURNING id`
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        use crate::schema::users::dsl::*;
        let mut conn = self.pool.get().await?;

        let new_id: i32 = diesel::insert_into(users)
            .values(&new_user)
            .returning(id)
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))?;

        Ok(new_user.with_id(new_id))
    }

    async fn ping(&self) -> AppResult<()> {
        db::ping(&self.pool).await
    }
}
