//! Update User Use Case
//!
//! Serves both full replacement and partial update; the difference is
//! settled when the request body is read.

use kernel::id::UserId;
use kernel::validation::FieldErrors;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::create_user::{UserInput, check_password_similarity};
use crate::domain::entity::user::{User, UserPatch};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::user_password::UserPassword;
use crate::error::{AuthError, AuthResult, USERNAME_TAKEN_MESSAGE};

/// Update user use case
pub struct UpdateUserUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> UpdateUserUseCase<U, T>
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

    pub async fn execute(&self, id: UserId, input: UserInput) -> AuthResult<User> {
        let existing = self
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let mut errors = FieldErrors::new();

        if let Some(user_name) = &input.user_name {
            if self.user_repo.exists_by_user_name(user_name, Some(id)).await? {
                errors.add("username", USERNAME_TAKEN_MESSAGE);
            }
        }

        if let Some(raw) = &input.password {
            check_password_similarity(
                raw,
                input
                    .user_name
                    .as_ref()
                    .unwrap_or(&existing.user_name)
                    .as_str(),
                input.email.as_ref().unwrap_or(&existing.email).as_str(),
                input
                    .first_name
                    .as_ref()
                    .unwrap_or(&existing.first_name)
                    .as_str(),
                input
                    .last_name
                    .as_ref()
                    .unwrap_or(&existing.last_name)
                    .as_str(),
                &mut errors,
            );
        }
        errors.into_result()?;

        let password = input
            .password
            .as_ref()
            .map(|raw| UserPassword::from_raw(raw, self.config.pepper()))
            .transpose()?;

        let deactivated = existing.is_active && input.is_active == Some(false);

        let patch = UserPatch {
            user_name: input.user_name,
            password,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            is_active: input.is_active,
            is_staff: input.is_staff,
        };

        let user = self
            .user_repo
            .update(id, patch)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if deactivated {
            let revoked = self.token_repo.delete_for_user(id).await?;
            tracing::info!(user_id = %id, tokens_revoked = revoked, "User deactivated");
        }

        tracing::info!(user_id = %user.id, "User updated");

        Ok(user)
    }
}

#[cfg(test)]
mod update_user_tests {
    use super::*;
    use crate::domain::entity::auth_token::AuthToken;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{
        person_name::PersonName,
        user_name::UserName,
        user_password::RawPassword,
    };
    use crate::infra::memory::InMemoryAuthRepository;
    use chrono::Duration;

    async fn setup() -> (
        Arc<InMemoryAuthRepository>,
        UpdateUserUseCase<InMemoryAuthRepository, InMemoryAuthRepository>,
    ) {
        let repo = Arc::new(InMemoryAuthRepository::new());
        for name in ["alice", "bob"] {
            let raw = RawPassword::new("correct-horse-battery".to_string()).unwrap();
            repo.create(NewUser::new(
                UserName::new(name).unwrap(),
                UserPassword::from_raw(&raw, None).unwrap(),
            ))
            .await
            .unwrap();
        }
        let use_case =
            UpdateUserUseCase::new(repo.clone(), repo.clone(), Arc::new(AuthConfig::default()));
        (repo, use_case)
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let (_, use_case) = setup().await;

        let user = use_case
            .execute(
                UserId::from_i64(1),
                UserInput {
                    first_name: Some(PersonName::new("Alice").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.first_name.as_str(), "Alice");
        assert_eq!(user.user_name.as_str(), "alice");
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn test_rename_to_taken_name() {
        let (_, use_case) = setup().await;

        let err = use_case
            .execute(
                UserId::from_i64(1),
                UserInput {
                    user_name: Some(UserName::new("bob").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(e) if e.contains("username")));
    }

    #[tokio::test]
    async fn test_keeping_own_name_is_allowed() {
        let (_, use_case) = setup().await;
        let result = use_case
            .execute(
                UserId::from_i64(1),
                UserInput {
                    user_name: Some(UserName::new("alice").unwrap()),
                    ..Default::default()
                },
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_password_change() {
        let (repo, use_case) = setup().await;
        use_case
            .execute(
                UserId::from_i64(2),
                UserInput {
                    password: Some(RawPassword::new("a-brand-new-phrase".to_string()).unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let bob = repo.find_by_id(UserId::from_i64(2)).await.unwrap().unwrap();
        let new = RawPassword::attempt("a-brand-new-phrase".to_string());
        assert!(bob.password.verify(&new, None));
    }

    #[tokio::test]
    async fn test_deactivation_revokes_tokens() {
        let (repo, use_case) = setup().await;
        let (token, _) = AuthToken::issue(UserId::from_i64(1), Duration::hours(1));
        repo.insert(&token).await.unwrap();

        use_case
            .execute(
                UserId::from_i64(1),
                UserInput {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(repo.find_by_hash(&token.token_hash).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let (_, use_case) = setup().await;
        let err = use_case
            .execute(UserId::from_i64(42), UserInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
