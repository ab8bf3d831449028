//! Auth Token Entity
//!
//! A bearer credential bound to one user. The plaintext key is returned to
//! the client once; the store only ever sees its hash.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;

use crate::domain::value_object::token_key::{TokenHash, TokenKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token_hash: TokenHash,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Issue a new token for `user_id`, valid for `ttl`
    ///
    /// Returns the stored record and the plaintext key.
    pub fn issue(user_id: UserId, ttl: Duration) -> (Self, TokenKey) {
        let key = TokenKey::generate();
        let now = Utc::now();
        let token = Self {
            token_hash: key.hash(),
            user_id,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        (token, key)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_hashes_the_key() {
        let (token, key) = AuthToken::issue(UserId::from_i64(7), Duration::hours(1));
        assert_eq!(token.token_hash, key.hash());
        assert_eq!(token.user_id, UserId::from_i64(7));
        assert!(!token.is_expired());
    }

    #[test]
    fn test_expiry() {
        let (token, _) = AuthToken::issue(UserId::from_i64(1), Duration::minutes(5));
        assert!(!token.is_expired_at(token.created_at));
        assert!(token.is_expired_at(token.expires_at));
        assert!(token.is_expired_at(token.created_at + Duration::minutes(6)));
    }
}
