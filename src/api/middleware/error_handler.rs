//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the service as `{"error": "<message>"}`, whether it
//! came from a handler or from the router itself (unknown path, wrong method).

use axum::{
    Json,
    body::Bytes,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - BadRequest → 400 BAD_REQUEST
    /// - Database → 500 INTERNAL_SERVER_ERROR
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 500 INTERNAL_SERVER_ERROR
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    ///
    /// The body carries the underlying error text verbatim, storage errors included.
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        if status.is_server_error() {
            tracing::error!(error = ?self, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(ErrorResponse::new(self.root_message()))).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::ConnectionPool { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Global error handling middleware.
///
/// Responses with an error status and a non-JSON body (axum's own 404/405,
/// extractor rejections) are rewritten to the `{"error"}` envelope. The
/// original plain-text body is kept as the message when there is one.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_else(|_| Bytes::new());
    let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();

    let message = if original_message.is_empty() {
        default_message(status)
    } else {
        original_message
    };

    (status, Json(ErrorResponse::new(message))).into_response()
}

fn default_message(status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => "The requested resource was not found".to_string(),
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint".to_string(),
        StatusCode::PAYLOAD_TOO_LARGE => "Request payload too large".to_string(),
        other => other
            .canonical_reason()
            .unwrap_or("An unknown error occurred")
            .to_string(),
    }
}
