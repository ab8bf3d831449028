//! User Password Value Object
//!
//! Delegates to `platform::password` for the policy and the Argon2id hash.
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("MySecurePass123!".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, None).unwrap();
//! assert!(hashed.verify(&raw, None));
//! ```

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// A new password being set; the policy applies
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw).map(Self)
    }

    /// A password presented at sign-in; no policy check
    pub fn attempt(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    /// Reject a password that resembles the account's own details
    pub fn check_similarity(&self, attributes: &[(&str, &str)]) -> Result<(), PasswordPolicyError> {
        self.0.check_similarity(attributes)
    }

    pub(crate) fn as_clear_text(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, safe to store)
// ============================================================================

/// Stored credential (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with the optional application pepper
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.as_clear_text().hash(pepper).map(Self)
    }

    /// Rebuild from the stored PHC string
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.as_clear_text(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("correct-horse-battery".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        assert!(stored.verify(&raw, Some(b"pepper")));
        assert!(!stored.verify(&RawPassword::attempt("nope".to_string()), Some(b"pepper")));
    }

    #[test]
    fn test_phc_roundtrip() {
        let raw = RawPassword::new("correct-horse-battery".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, None).unwrap();
        let restored = UserPassword::from_phc(stored.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, None));
    }

    #[test]
    fn test_policy_applies_to_new_passwords_only() {
        assert!(RawPassword::new("short".to_string()).is_err());
        // Attempts are never rejected up front
        let _ = RawPassword::attempt("short".to_string());
    }

    #[test]
    fn test_debug_redacted() {
        let raw = RawPassword::attempt("hunter2hunter2".to_string());
        assert!(!format!("{raw:?}").contains("hunter2"));
    }
}
