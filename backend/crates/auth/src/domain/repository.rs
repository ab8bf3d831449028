//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{
    auth_token::AuthToken,
    user::{NewUser, User, UserPatch},
};
use crate::domain::value_object::{token_key::TokenHash, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Store a new user; the store assigns id and join time
    ///
    /// Fails with `AuthError::UsernameTaken` on a duplicate user name.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>>;

    /// Find user by exact user name
    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<User>>;

    /// Check if a user name is in use by anyone other than `excluding`
    async fn exists_by_user_name(
        &self,
        user_name: &UserName,
        excluding: Option<UserId>,
    ) -> AuthResult<bool>;

    /// All users, ordered by id
    async fn list(&self) -> AuthResult<Vec<User>>;

    /// Merge `patch` into the stored user; `None` if there is no such user
    async fn update(&self, id: UserId, patch: UserPatch) -> AuthResult<Option<User>>;

    /// Remove a user and their tokens; `false` if there was no such user
    async fn delete(&self, id: UserId) -> AuthResult<bool>;

    /// Record a successful login
    async fn set_last_login(&self, id: UserId, at: DateTime<Utc>) -> AuthResult<()>;
}

/// Auth token repository trait
#[trait_variant::make(TokenRepository: Send)]
pub trait LocalTokenRepository {
    /// Store a newly issued token
    async fn insert(&self, token: &AuthToken) -> AuthResult<()>;

    /// Find a token by the hash of its key
    async fn find_by_hash(&self, token_hash: &TokenHash) -> AuthResult<Option<AuthToken>>;

    /// Delete one token; `false` if it did not exist
    async fn delete_by_hash(&self, token_hash: &TokenHash) -> AuthResult<bool>;

    /// Delete every token of a user
    async fn delete_for_user(&self, user_id: UserId) -> AuthResult<u64>;

    /// Clean up expired tokens
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
