//! User-related DTOs for API requests and responses.

use crate::api::dto::MessageResponse;
use crate::models::{NewUser, User};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Sentinel returned by `GET /users` instead of an empty array.
pub const NO_USERS_MESSAGE: &str = "No users found";

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
///
/// Only types are checked: a missing or `null` field binds as an empty
/// string and any `id` sent by the client is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[schema(example = json!({"username": "alice", "password": "s3cret"}))]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schema(format = Password)]
    pub password: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl CreateUserRequest {
    /// Converts the request DTO into a NewUser model for database insertion.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            password: self.password,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for user data.
///
/// Includes the plaintext password exactly as stored.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[schema(example = json!({"id": 1, "username": "alice", "password": "s3cret"}))]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub password: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            password: user.password,
        }
    }
}

/// Body of `GET /users`: an array when rows exist, the
/// `{"message": "No users found"}` object when the table is empty.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserListResponse {
    Users(Vec<UserResponse>),
    Empty(MessageResponse),
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        if users.is_empty() {
            UserListResponse::Empty(MessageResponse::new(NO_USERS_MESSAGE))
        } else {
            UserListResponse::Users(users.into_iter().map(UserResponse::from).collect())
        }
    }
}
