//! Revoke Token Use Case

use std::sync::Arc;

use crate::application::authenticate::AuthenticatedUser;
use crate::domain::repository::TokenRepository;
use crate::error::AuthResult;

/// Revoke token use case
pub struct RevokeTokenUseCase<T>
where
    T: TokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> RevokeTokenUseCase<T>
where
    T: TokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// Delete the token the caller authenticated with
    pub async fn execute(&self, current: &AuthenticatedUser) -> AuthResult<()> {
        let deleted = self.token_repo.delete_by_hash(&current.token_hash).await?;

        tracing::info!(user_id = %current.user_id, deleted, "Auth token revoked");

        Ok(())
    }
}
