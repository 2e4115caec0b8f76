use crate::error::{AppError, AppResult};
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// JSON body extractor that ignores the `Content-Type` header.
///
/// The body is buffered and decoded with `serde_json`; any failure, including
/// an unreadable body, becomes [`AppError::BadRequest`] carrying the decoder's
/// message.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest {
                message: rejection.body_text(),
            })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;
        Ok(JsonBody(value))
    }
}
