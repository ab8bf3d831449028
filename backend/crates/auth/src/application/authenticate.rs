//! Authenticate Use Case
//!
//! Resolves the `Authorization` header of a request to an active user.

use axum::http::HeaderMap;
use kernel::id::UserId;
use platform::bearer::extract_bearer_token;
use std::sync::Arc;

use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{
    token_key::{TokenHash, TokenKey},
    user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

/// The caller behind a valid bearer token
///
/// Stored in request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub user_name: UserName,
    pub is_staff: bool,
    /// Hash of the presented token
    pub token_hash: TokenHash,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
}

impl<U, T> AuthenticateUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>) -> Self {
        Self {
            user_repo,
            token_repo,
        }
    }

    /// Authenticate from request headers
    pub async fn execute(&self, headers: &HeaderMap) -> AuthResult<AuthenticatedUser> {
        let key = extract_bearer_token(headers)?;
        self.authenticate_key(&TokenKey::from_presented(key)).await
    }

    /// Authenticate a bare token key
    pub async fn authenticate_key(&self, key: &TokenKey) -> AuthResult<AuthenticatedUser> {
        let token_hash = key.hash();

        let token = self
            .token_repo
            .find_by_hash(&token_hash)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        if token.is_expired() {
            self.token_repo.delete_by_hash(&token_hash).await?;
            return Err(AuthError::TokenExpired);
        }

        let user = self
            .user_repo
            .find_by_id(token.user_id)
            .await?
            .filter(|user| user.can_login())
            .ok_or(AuthError::UserInactive)?;

        Ok(AuthenticatedUser {
            user_id: user.id,
            user_name: user.user_name,
            is_staff: user.is_staff,
            token_hash,
        })
    }
}
