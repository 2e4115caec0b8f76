//! User request handlers.
//!
//! `GET /users` and `POST /users`. Each handler is a single storage call;
//! nothing is retried.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{CreateUserRequest, ErrorResponse, UserListResponse, UserResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::json::JsonBody;

/// Creates user-related routes.
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(list_users, create_user))
}

/// GET /users - List all users
///
/// Returns every stored user in storage order, or the
/// `{"message": "No users found"}` object when there are none.
#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users, or a message when the table is empty", body = UserListResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_users(State(state): State<AppState>) -> AppResult<Json<UserListResponse>> {
    let users = state.services.users.list_users().await?;
    Ok(Json(UserListResponse::from(users)))
}

/// POST /users - Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Body is not a valid user object", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<Option<CreateUserRequest>>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    // A literal `null` body binds like `{}`
    let req = req.unwrap_or_default();
    let user = state.services.users.create_user(req.into_new_user()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::api::routes::create_router;
    use crate::repositories::memory_repo::{FailingUserStore, MemoryUserStore};
    use crate::repositories::{Repositories, UserStore};
    use crate::state::AppState;

    fn router_with(store: Arc<dyn UserStore>) -> Router {
        create_router(AppState::from_repositories(
            Repositories::with_user_store(store),
        ))
    }

    fn memory_router() -> Router {
        router_with(Arc::new(MemoryUserStore::new()))
    }

    fn failing_router() -> Router {
        router_with(Arc::new(FailingUserStore::new(
            "connection to server at \"localhost\" failed",
        )))
    }

    fn get_users() -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri("/users")
            .body(Body::empty())
            .unwrap()
    }

    fn post_users(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_empty_returns_message() {
        let response = memory_router().oneshot(get_users()).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "No users found"})
        );
    }

    #[tokio::test]
    async fn test_create_returns_created_user() {
        let response = memory_router()
            .oneshot(post_users(r#"{"username":"alice","password":"s3cret"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        // Password is echoed back in plaintext
        assert_eq!(
            body_json(response).await,
            json!({"id": 1, "username": "alice", "password": "s3cret"})
        );
    }

    #[tokio::test]
    async fn test_create_then_list_contains_user() {
        let app = memory_router();

        let created = app
            .clone()
            .oneshot(post_users(r#"{"username":"bob","password":"pw"}"#))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = body_json(created).await;

        let listed = app.oneshot(get_users()).await.unwrap();
        assert_eq!(listed.status(), StatusCode::OK);
        let listed = body_json(listed).await;

        let rows = listed.as_array().expect("list should be an array");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], created);
        assert!(rows[0]["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_create_is_not_idempotent() {
        let app = memory_router();
        let mut ids = HashSet::new();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post_users(r#"{"username":"twin","password":"same"}"#))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            ids.insert(body_json(response).await["id"].as_i64().unwrap());
        }
        assert_eq!(ids.len(), 2);

        let listed = body_json(app.oneshot(get_users()).await.unwrap()).await;
        assert_eq!(listed.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_client_supplied_id_is_ignored() {
        let response = memory_router()
            .oneshot(post_users(
                r#"{"id":42,"username":"carol","password":"pw"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["id"], 1);
    }

    #[tokio::test]
    async fn test_create_missing_fields_store_empty_strings() {
        let app = memory_router();

        let response = app
            .clone()
            .oneshot(post_users(r#"{"username":"alice"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"id": 1, "username": "alice", "password": ""})
        );

        let response = app.clone().oneshot(post_users("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"id": 2, "username": "", "password": ""})
        );

        let listed = body_json(app.oneshot(get_users()).await.unwrap()).await;
        assert_eq!(listed.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_null_body_is_accepted() {
        let response = memory_router().oneshot(post_users("null")).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({"id": 1, "username": "", "password": ""})
        );
    }

    #[tokio::test]
    async fn test_create_wrong_type_is_bad_request() {
        let app = memory_router();
        let response = app
            .clone()
            .oneshot(post_users(r#"{"username":123}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(!body["error"].as_str().unwrap().is_empty());

        // Nothing was stored
        let listed = body_json(app.oneshot(get_users()).await.unwrap()).await;
        assert_eq!(listed, json!({"message": "No users found"}));
    }

    #[tokio::test]
    async fn test_create_non_json_is_bad_request() {
        let response = memory_router()
            .oneshot(post_users("username=alice&password=pw"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_without_content_type() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/users")
            .body(Body::from(r#"{"username":"dave","password":"pw"}"#))
            .unwrap();

        let response = memory_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_list_storage_failure_is_internal_error() {
        let response = failing_router().oneshot(get_users()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        // Raw driver text reaches the client
        assert_eq!(
            body["error"],
            "connection to server at \"localhost\" failed"
        );
    }

    #[tokio::test]
    async fn test_create_storage_failure_is_internal_error() {
        let response = failing_router()
            .oneshot(post_users(r#"{"username":"eve","password":"pw"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_json(response).await["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decode_failure_wins_over_storage_failure() {
        let response = failing_router()
            .oneshot(post_users("{"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
