//! Router configuration for the API.
//!
//! This module provides centralized route registration, OpenAPI
//! documentation and middleware configuration for the application.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers::{health::health_routes, users::user_routes};
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Swagger UI mount point
pub const SWAGGER_PATH: &str = "/swagger";

/// Location of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Compression
/// 2. Request ID middleware - generates/propagates request IDs
/// 3. Logging middleware - logs requests with request IDs
/// 4. Global error handler - rewrites non-JSON error bodies
///
/// # Routes
/// - `GET /users`, `POST /users`
/// - `GET /health`
/// - `GET /swagger` (UI) and `GET /api-docs/openapi.json`
pub fn create_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(user_routes())
        .merge(health_routes())
        .split_for_parts();

    router
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_JSON_PATH, api))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::api::middleware::REQUEST_ID_HEADER;
    use crate::repositories::Repositories;
    use crate::repositories::memory_repo::MemoryUserStore;

    fn app() -> Router {
        create_router(AppState::from_repositories(Repositories::with_user_store(
            Arc::new(MemoryUserStore::new()),
        )))
    }

    async fn send(method: Method, uri: &str) -> axum::response::Response {
        app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_openapi_document_lists_endpoints() {
        let (_, api) = OpenApiRouter::<AppState>::with_openapi(ApiDoc::openapi())
            .merge(user_routes())
            .merge(health_routes())
            .split_for_parts();

        assert_eq!(api.info.title, "Userbase API");
        let users = api.paths.paths.get("/users").expect("/users documented");
        assert!(users.get.is_some());
        assert!(users.post.is_some());
        assert!(api.paths.paths.contains_key("/health"));
    }

    #[tokio::test]
    async fn test_openapi_json_is_served() {
        let response = send(Method::GET, OPENAPI_JSON_PATH).await;
        assert_eq!(response.status(), StatusCode::OK);

        let doc = body_json(response).await;
        assert_eq!(doc["info"]["title"], "Userbase API");
        assert!(doc["paths"]["/users"]["post"].is_object());
    }

    #[tokio::test]
    async fn test_swagger_ui_is_served() {
        let response = send(Method::GET, "/swagger/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"), "got {}", content_type);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8_lossy(&bytes).to_lowercase();
        assert!(html.contains("<html"));
        assert!(html.contains("swagger-ui"));
    }

    #[tokio::test]
    async fn test_swagger_without_slash_redirects() {
        let response = send(Method::GET, SWAGGER_PATH).await;
        assert!(response.status().is_redirection());
    }

    #[tokio::test]
    async fn test_unknown_path_uses_error_envelope() {
        let response = send(Method::GET, "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_wrong_method_uses_error_envelope() {
        let response = send(Method::DELETE, "/users").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_every_response_has_request_id() {
        let response = send(Method::GET, "/users").await;
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let response = send(Method::GET, "/nope").await;
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }
}
