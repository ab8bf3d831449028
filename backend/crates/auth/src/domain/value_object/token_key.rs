//! Bearer Token Key
//!
//! The opaque credential handed to a client. Only its SHA-256 digest is
//! ever stored.

use platform::crypto::{random_key, sha256};
use std::fmt;

/// Random bytes behind a key (43 base64url characters)
pub const TOKEN_KEY_BYTES: usize = 32;

/// Plaintext token key
#[derive(Clone, PartialEq, Eq)]
pub struct TokenKey(String);

impl TokenKey {
    /// Fresh random key
    pub fn generate() -> Self {
        Self(random_key(TOKEN_KEY_BYTES))
    }

    /// Wrap a key presented by a client
    pub fn from_presented(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Digest used as the storage key
    pub fn hash(&self) -> TokenHash {
        TokenHash(sha256(self.0.as_bytes()))
    }

    /// Plaintext, for returning to the client once
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenKey").field(&"[REDACTED]").finish()
    }
}

/// SHA-256 digest of a [`TokenKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenHash([u8; 32]);

impl TokenHash {
    /// Rebuild from a stored digest; `None` if the length is wrong
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(bytes).ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
