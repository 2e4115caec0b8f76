//! Error and message envelopes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every 4xx/5xx response: `{"error": "..."}`.
///
/// For storage failures `error` carries the driver's own message, which
/// exposes internal details to callers.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"error": "EOF while parsing a value at line 1 column 0"}))]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Informational body: `{"message": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
