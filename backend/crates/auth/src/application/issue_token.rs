//! Issue Token Use Case
//!
//! Exchanges a user name and password for a bearer token.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_token::AuthToken;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{
    token_key::TokenKey, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Issue token input
pub struct IssueTokenInput {
    pub user_name: String,
    pub password: String,
}

impl std::fmt::Debug for IssueTokenInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueTokenInput")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Issue token output
#[derive(Debug)]
pub struct IssueTokenOutput {
    /// Plaintext key; not recoverable after this
    pub token: TokenKey,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Issue token use case
pub struct IssueTokenUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> IssueTokenUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    pub async fn execute(&self, input: IssueTokenInput) -> AuthResult<IssueTokenOutput> {
        let lookup = UserName::normalize(&input.user_name);
        let raw_password = RawPassword::attempt(input.password);

        let user = self
            .user_repo
            .find_by_user_name(&lookup)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Same answer as a wrong password
        if !user.can_login() {
            tracing::warn!(user_id = %user.id, "Token requested for inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        let (token, key) = AuthToken::issue(user.id, self.config.token_ttl_chrono());
        self.token_repo.insert(&token).await?;
        self.user_repo
            .set_last_login(user.id, token.created_at)
            .await?;

        tracing::info!(
            user_id = %user.id,
            expires_at = %token.expires_at,
            "Auth token issued"
        );

        Ok(IssueTokenOutput {
            token: key,
            user_id: user.id,
            expires_at: token.expires_at,
        })
    }
}
