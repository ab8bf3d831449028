//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use kernel::id::UserId;
use kernel::validation::WriteMode;
use serde_json::Value;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticateUseCase, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, IssueTokenUseCase,
    ListUsersUseCase, RevokeTokenUseCase, UpdateUserUseCase,
};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    TokenResponse, UserResponse, parse_token_request, parse_user_input,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Unparsable ids cannot name a stored user
fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse().map_err(|_| AuthError::UserNotFound)
}

// ============================================================================
// Token
// ============================================================================

/// POST /auth/token
pub async fn issue_token<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let input = parse_token_request(&body)?;

    let use_case = IssueTokenUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case.execute(input).await?;

    Ok(Json(output.into()))
}

/// DELETE /auth/token
///
/// Revokes the token presented in the `Authorization` header.
pub async fn revoke_token<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<StatusCode>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let current = AuthenticateUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&headers)
        .await?;

    RevokeTokenUseCase::new(state.repo.clone())
        .execute(&current)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Users
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let users = ListUsersUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let input = parse_user_input(&body, WriteMode::Create)?;

    let user = CreateUserUseCase::new(state.repo.clone(), state.config.clone())
        .execute(input)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    let user = GetUserUseCase::new(state.repo.clone()).execute(id).await?;
    Ok(Json(user.into()))
}

/// PUT /users/{id}
pub async fn replace_user<R>(
    state: State<AuthAppState<R>>,
    id: Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    write_user(state, id, payload, WriteMode::Replace).await
}

/// PATCH /users/{id}
pub async fn patch_user<R>(
    state: State<AuthAppState<R>>,
    id: Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    write_user(state, id, payload, WriteMode::Partial).await
}

async fn write_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
    mode: WriteMode,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    // A missing user is reported before any body problem
    GetUserUseCase::new(state.repo.clone()).execute(id).await?;

    let Json(body) = payload?;
    let input = parse_user_input(&body, mode)?;

    let use_case = UpdateUserUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let user = use_case.execute(id, input).await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    DeleteUserUseCase::new(state.repo.clone()).execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
