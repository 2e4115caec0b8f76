//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - User-related request/response DTOs
//! - `health` - Health probe report
//! - `error` - Error and message envelopes

mod error;
mod health;
mod user;

pub use error::{ErrorResponse, MessageResponse};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use user::{CreateUserRequest, NO_USERS_MESSAGE, UserListResponse, UserResponse};
