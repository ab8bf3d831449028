//! Auth Routers
//!
//! `token_router` is public; `users_router` expects the caller to put it
//! behind [`require_bearer_token`](crate::presentation::middleware::require_bearer_token).

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};

fn app_state<R>(repo: R, config: AuthConfig) -> AuthAppState<R>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    }
}

/// Token issue/revoke routes
pub fn token_router<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/auth/token",
            post(handlers::issue_token::<R>).delete(handlers::revoke_token::<R>),
        )
        .with_state(app_state(repo, config))
}

/// User CRUD routes
pub fn users_router<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::replace_user::<R>)
                .patch(handlers::patch_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .with_state(app_state(repo, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::BootstrapUserUseCase;
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::presentation::middleware::{AuthMiddlewareState, require_bearer_token};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let repo = InMemoryAuthRepository::new();
        BootstrapUserUseCase::new(Arc::new(repo.clone()), Arc::new(AuthConfig::default()))
            .execute("admin", "correct-horse-battery".to_string())
            .await
            .unwrap();

        users_router(repo.clone(), AuthConfig::default())
            .route_layer(axum::middleware::from_fn_with_state(
                AuthMiddlewareState::new(repo.clone()),
                require_bearer_token::<InMemoryAuthRepository>,
            ))
            .merge(token_router(repo, AuthConfig::default()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/auth/token",
                None,
                json!({ "username": "admin", "password": "correct-horse-battery" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_users_require_token() {
        let app = app().await;
        let (status, _) = send(&app, json_request("GET", "/users", None, Value::Null)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let app = app().await;
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/auth/token",
                None,
                json!({ "username": "admin", "password": "not-the-password" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"]["non_field_errors"][0],
            "Unable to log in with provided credentials."
        );
    }

    #[tokio::test]
    async fn test_user_crud() {
        let app = app().await;
        let token = login(&app).await;

        let (status, created) = send(
            &app,
            json_request(
                "POST",
                "/users",
                Some(&token),
                json!({ "username": "bob", "password": "another-fine-phrase", "email": "bob@example.com" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 2);
        assert_eq!(created["email"], "bob@example.com");
        assert!(created.get("password").is_none());

        let (status, patched) = send(
            &app,
            json_request("PATCH", "/users/2", Some(&token), json!({ "last_name": "Builder" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["last_name"], "Builder");
        assert_eq!(patched["username"], "bob");

        let (status, list) = send(&app, json_request("GET", "/users", Some(&token), Value::Null)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 2);

        let (status, _) =
            send(&app, json_request("DELETE", "/users/2", Some(&token), Value::Null)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, json_request("GET", "/users/2", Some(&token), Value::Null)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let app = app().await;
        let token = login(&app).await;
        let (status, _) =
            send(&app, json_request("GET", "/users/abc", Some(&token), Value::Null)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_revoke_token() {
        let app = app().await;
        let token = login(&app).await;

        let (status, _) = send(
            &app,
            json_request("DELETE", "/auth/token", Some(&token), Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, json_request("GET", "/users", Some(&token), Value::Null)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token.");
    }
}
