//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::{
    auth_token::AuthToken,
    user::{NewUser, User, UserPatch},
};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, person_name::PersonName, token_key::TokenHash, user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Unique index on `users.username`
const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

const USER_COLUMNS: &str = r#"
    id,
    username,
    credential_hash,
    email,
    first_name,
    last_name,
    is_active,
    is_staff,
    date_joined,
    last_login
"#;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A duplicate user name surfaces as a field error, not a 409
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
        {
            return AuthError::UsernameTaken;
        }
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                username,
                credential_hash,
                email,
                first_name,
                last_name,
                is_active,
                is_staff
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.user_name.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.email.as_str())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.is_active)
        .bind(user.is_staff)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name(
        &self,
        user_name: &UserName,
        excluding: Option<UserId>,
    ) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(user_name.as_str())
        .bind(excluding.map(|id| id.as_i64()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                credential_hash = COALESCE($3, credential_hash),
                email = COALESCE($4, email),
                first_name = COALESCE($5, first_name),
                last_name = COALESCE($6, last_name),
                is_active = COALESCE($7, is_active),
                is_staff = COALESCE($8, is_staff)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id.as_i64())
        .bind(patch.user_name.as_ref().map(UserName::as_str))
        .bind(patch.password.as_ref().map(UserPassword::as_phc_string))
        .bind(patch.email.as_ref().map(Email::as_str))
        .bind(patch.first_name.as_ref().map(PersonName::as_str))
        .bind(patch.last_name.as_ref().map(PersonName::as_str))
        .bind(patch.is_active)
        .bind(patch.is_staff)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn delete(&self, id: UserId) -> AuthResult<bool> {
        // auth_tokens rows go with it (ON DELETE CASCADE)
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn set_last_login(&self, id: UserId, at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Token Repository Implementation
// ============================================================================

impl TokenRepository for PgAuthRepository {
    async fn insert(&self, token: &AuthToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (
                token_hash,
                user_id,
                created_at,
                expires_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(token.token_hash.as_bytes())
        .bind(token.user_id.as_i64())
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &TokenHash) -> AuthResult<Option<AuthToken>> {
        let row = sqlx::query_as::<_, AuthTokenRow>(
            r#"
            SELECT
                token_hash,
                user_id,
                created_at,
                expires_at
            FROM auth_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash.as_bytes())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_token()).transpose()
    }

    async fn delete_by_hash(&self, token_hash: &TokenHash) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM auth_tokens WHERE token_hash = $1")
            .bind(token_hash.as_bytes())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn delete_for_user(&self, user_id: UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_tokens WHERE expires_at <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired auth tokens");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    credential_hash: String,
    email: String,
    first_name: String,
    last_name: String,
    is_active: bool,
    is_staff: bool,
    date_joined: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password = UserPassword::from_phc(self.credential_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid credential hash: {}", e)))?;

        Ok(User {
            id: UserId::from_i64(self.id),
            user_name: UserName::from_db(self.username),
            password,
            email: Email::from_db(self.email),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            is_active: self.is_active,
            is_staff: self.is_staff,
            date_joined: self.date_joined,
            last_login: self.last_login,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthTokenRow {
    token_hash: Vec<u8>,
    user_id: i64,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AuthTokenRow {
    fn into_token(self) -> AuthResult<AuthToken> {
        let token_hash = TokenHash::from_slice(&self.token_hash)
            .ok_or_else(|| AuthError::Internal("Invalid token hash length".to_string()))?;

        Ok(AuthToken {
            token_hash,
            user_id: UserId::from_i64(self.user_id),
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}
