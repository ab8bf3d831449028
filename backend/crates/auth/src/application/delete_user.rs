//! Delete User Use Case

use kernel::id::UserId;
use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Delete user use case
pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Remove the user together with their tokens
    pub async fn execute(&self, id: UserId) -> AuthResult<()> {
        if !self.user_repo.delete(id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}

#[cfg(test)]
mod delete_user_tests {
    use super::*;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use crate::infra::memory::InMemoryAuthRepository;

    #[tokio::test]
    async fn test_delete_then_missing() {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let raw = RawPassword::new("correct-horse-battery".to_string()).unwrap();
        let alice = repo
            .create(NewUser::new(
                UserName::new("alice").unwrap(),
                UserPassword::from_raw(&raw, None).unwrap(),
            ))
            .await
            .unwrap();

        let use_case = DeleteUserUseCase::new(repo.clone());
        use_case.execute(alice.id).await.unwrap();

        assert!(repo.find_by_id(alice.id).await.unwrap().is_none());
        assert!(matches!(
            use_case.execute(alice.id).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
