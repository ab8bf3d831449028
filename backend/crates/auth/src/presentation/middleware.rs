//! Auth Middleware
//!
//! Middleware for requiring a bearer token on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> AuthMiddlewareState<R>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

/// Middleware that requires a valid bearer token
///
/// Rejects with 401 before the handler runs. On success the caller is
/// available to handlers as `Extension<AuthenticatedUser>`.
///
/// ```rust,ignore
/// router.route_layer(axum::middleware::from_fn_with_state(
///     AuthMiddlewareState::new(repo),
///     require_bearer_token::<InMemoryAuthRepository>,
/// ))
/// ```
pub async fn require_bearer_token<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.repo.clone());
    let current = use_case.execute(req.headers()).await?;

    tracing::debug!(
        user_id = %current.user_id,
        method = %req.method(),
        path = %req.uri().path(),
        "Request authenticated"
    );

    req.extensions_mut().insert(current);

    Ok(next.run(req).await)
}
