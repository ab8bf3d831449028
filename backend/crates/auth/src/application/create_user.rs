//! Create User Use Case

use kernel::validation::{FieldErrors, messages};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    person_name::PersonName,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult, USERNAME_TAKEN_MESSAGE};

/// Validated user fields from a write request; `None` means "not sent"
#[derive(Debug, Default)]
pub struct UserInput {
    pub user_name: Option<UserName>,
    pub password: Option<RawPassword>,
    pub email: Option<Email>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

/// Check a new password against the account's own details
pub(crate) fn check_password_similarity(
    password: &RawPassword,
    user_name: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    errors: &mut FieldErrors,
) {
    let attributes = [
        ("username", user_name),
        ("first_name", first_name),
        ("last_name", last_name),
        ("email", email),
    ];
    if let Err(e) = password.check_similarity(&attributes) {
        errors.add("password", e.to_string());
    }
}

/// Create user use case
pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: UserInput) -> AuthResult<User> {
        let mut errors = FieldErrors::new();

        let (Some(user_name), Some(password)) = (input.user_name, input.password) else {
            // Required fields are enforced when the body is read
            errors.add("username", messages::REQUIRED);
            errors.add("password", messages::REQUIRED);
            return Err(AuthError::Validation(errors));
        };

        let email = input.email.unwrap_or_default();
        let first_name = input.first_name.unwrap_or_default();
        let last_name = input.last_name.unwrap_or_default();

        if self.user_repo.exists_by_user_name(&user_name, None).await? {
            errors.add("username", USERNAME_TAKEN_MESSAGE);
        }
        check_password_similarity(
            &password,
            user_name.as_str(),
            email.as_str(),
            first_name.as_str(),
            last_name.as_str(),
            &mut errors,
        );
        errors.into_result()?;

        let user = self
            .user_repo
            .create(NewUser {
                user_name,
                password: UserPassword::from_raw(&password, self.config.pepper())?,
                email,
                first_name,
                last_name,
                is_active: input.is_active.unwrap_or(true),
                is_staff: input.is_staff.unwrap_or(false),
            })
            .await?;

        tracing::info!(user_id = %user.id, user_name = %user.user_name, "User created");

        Ok(user)
    }
}
