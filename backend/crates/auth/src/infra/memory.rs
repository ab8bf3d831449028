//! In-memory Repository Implementations
//!
//! Backs tests and database-less runs. Ids start at 1 and are never reused.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entity::{
    auth_token::AuthToken,
    user::{NewUser, User, UserPatch},
};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{token_key::TokenHash, user_name::UserName};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct AuthStore {
    users: BTreeMap<UserId, User>,
    tokens: HashMap<TokenHash, AuthToken>,
    last_user_id: i64,
}

impl AuthStore {
    fn user_name_taken(&self, user_name: &UserName, excluding: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| &u.user_name == user_name && Some(u.id) != excluding)
    }
}

/// Auth repository held in process memory
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    store: Arc<RwLock<AuthStore>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut store = self.store.write().await;

        if store.user_name_taken(&user.user_name, None) {
            return Err(AuthError::UsernameTaken);
        }

        store.last_user_id += 1;
        let id = UserId::from_i64(store.last_user_id);
        let user = user.into_user(id, Utc::now());
        store.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.user_name.as_str() == user_name)
            .cloned())
    }

    async fn exists_by_user_name(
        &self,
        user_name: &UserName,
        excluding: Option<UserId>,
    ) -> AuthResult<bool> {
        Ok(self.store.read().await.user_name_taken(user_name, excluding))
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        Ok(self.store.read().await.users.values().cloned().collect())
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> AuthResult<Option<User>> {
        let mut store = self.store.write().await;

        if let Some(user_name) = &patch.user_name {
            if store.user_name_taken(user_name, Some(id)) {
                return Err(AuthError::UsernameTaken);
            }
        }

        let Some(user) = store.users.get_mut(&id) else {
            return Ok(None);
        };
        user.apply(patch);

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> AuthResult<bool> {
        let mut store = self.store.write().await;

        if store.users.remove(&id).is_none() {
            return Ok(false);
        }
        store.tokens.retain(|_, token| token.user_id != id);

        Ok(true)
    }

    async fn set_last_login(&self, id: UserId, at: DateTime<Utc>) -> AuthResult<()> {
        if let Some(user) = self.store.write().await.users.get_mut(&id) {
            user.last_login = Some(at);
        }
        Ok(())
    }
}

// ============================================================================
// Token Repository Implementation
// ============================================================================

impl TokenRepository for InMemoryAuthRepository {
    async fn insert(&self, token: &AuthToken) -> AuthResult<()> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&token.user_id) {
            return Err(AuthError::UserNotFound);
        }
        store.tokens.insert(token.token_hash, token.clone());

        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &TokenHash) -> AuthResult<Option<AuthToken>> {
        Ok(self.store.read().await.tokens.get(token_hash).cloned())
    }

    async fn delete_by_hash(&self, token_hash: &TokenHash) -> AuthResult<bool> {
        Ok(self.store.write().await.tokens.remove(token_hash).is_some())
    }

    async fn delete_for_user(&self, user_id: UserId) -> AuthResult<u64> {
        let mut store = self.store.write().await;
        let before = store.tokens.len();
        store.tokens.retain(|_, token| token.user_id != user_id);
        Ok((before - store.tokens.len()) as u64)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut store = self.store.write().await;
        let before = store.tokens.len();
        store.tokens.retain(|_, token| !token.is_expired_at(now));
        let deleted = (before - store.tokens.len()) as u64;

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired auth tokens");

        Ok(deleted)
    }
}
