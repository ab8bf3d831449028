//! API Server Library
//!
//! Router composition shared by the binary and the HTTP tests.

pub mod config;

use articles::{ArticleRepository, admin_router, articles_router};
use auth::{
    AuthConfig, AuthMiddlewareState, TokenRepository, UserRepository, require_bearer_token,
    token_router, users_router,
};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};

pub use config::ApiConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Every route of the service
///
/// Article, admin, and user routes answer 401 without a valid bearer token
/// before any handler runs. `/auth/token` (POST) and `/health` are public.
pub fn build_app<AR, RR>(auth_repo: AR, article_repo: RR, auth_config: AuthConfig) -> Router
where
    AR: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    RR: ArticleRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .merge(articles_router(article_repo.clone()))
        .merge(admin_router(article_repo))
        .merge(users_router(auth_repo.clone(), auth_config.clone()))
        .route_layer(middleware::from_fn_with_state(
            AuthMiddlewareState::new(auth_repo.clone()),
            require_bearer_token::<AR>,
        ));

    Router::new()
        .merge(protected)
        .merge(token_router(auth_repo, auth_config))
        .route("/health", get(health))
}
