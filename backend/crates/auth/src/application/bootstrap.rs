//! Bootstrap User Use Case
//!
//! Ensures a first staff account exists so the authenticated endpoints are
//! reachable on an empty store.

use kernel::validation::FieldErrors;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Bootstrap user use case
pub struct BootstrapUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> BootstrapUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Create the account unless the name is already taken
    ///
    /// Returns the new user, or `None` when it already existed.
    pub async fn execute(&self, user_name: &str, password: String) -> AuthResult<Option<User>> {
        let mut errors = FieldErrors::new();

        let user_name = UserName::new(user_name)
            .map_err(|e| errors.add("username", e.to_string()))
            .ok();
        let password = RawPassword::new(password)
            .map_err(|e| errors.add("password", e.to_string()))
            .ok();

        let (Some(user_name), Some(password)) = (user_name, password) else {
            return Err(AuthError::Validation(errors));
        };

        if self
            .user_repo
            .exists_by_user_name(&user_name, None)
            .await?
        {
            tracing::debug!(user_name = %user_name, "Bootstrap user already present");
            return Ok(None);
        }

        let mut new_user = NewUser::new(
            user_name,
            UserPassword::from_raw(&password, self.config.pepper())?,
        );
        new_user.is_staff = true;

        let user = self.user_repo.create(new_user).await?;

        tracing::info!(user_id = %user.id, user_name = %user.user_name, "Bootstrap user created");

        Ok(Some(user))
    }
}
