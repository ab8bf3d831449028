//! Password Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, PHC string storage)
//! - Zeroization of clear text on drop
//! - Password policy: minimum length, not entirely numeric, not a common
//!   password, not too similar to the account's own attributes

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Attribute values shorter than this are not checked for similarity
const MIN_SIMILARITY_ATTRIBUTE_LENGTH: usize = 3;

const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "passw0rd",
    "12345678",
    "123456789",
    "1234567890",
    "abcdefgh",
    "abc12345",
    "letmein1",
    "welcome1",
    "admin123",
    "iloveyou",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "trustno1",
    "superman",
    "starwars",
    "whatever",
    "qwertyui",
    "qwerty123",
    "1q2w3e4r",
    "zaq12wsx",
];

const KEYBOARD_RUNS: &[&str] = &["qwertyuiop", "asdfghjkl", "zxcvbnm", "1qaz2wsx"];

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations, with caller-facing messages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("This password is too short. It must contain at least {min} characters.")]
    TooShort { min: usize, actual: usize },

    #[error("Ensure this field has no more than {max} characters.")]
    TooLong { max: usize, actual: usize },

    #[error("This field may not be blank.")]
    Blank,

    #[error("This password contains invalid control characters.")]
    InvalidCharacter,

    #[error("This password is entirely numeric.")]
    EntirelyNumeric,

    #[error("This password is too common.")]
    TooCommon,

    #[error("The password is too similar to the {attribute}.")]
    TooSimilar { attribute: String },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory when dropped
///
/// Not `Clone`, and `Debug` output is redacted.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("correct horse battery".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize (NFKC) and check the context-free policy rules
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if normalized.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(PasswordPolicyError::EntirelyNumeric);
        }

        if is_common_password(&normalized) {
            return Err(PasswordPolicyError::TooCommon);
        }

        Ok(Self(normalized))
    }

    /// Accept input as-is, for checking a sign-in attempt against a hash
    ///
    /// Policy rules only apply when a password is set, not when one is
    /// presented.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    /// Reject passwords that contain (or are contained in) one of the
    /// account's attribute values, e.g. `[("username", "alice")]`
    pub fn check_similarity(&self, attributes: &[(&str, &str)]) -> Result<(), PasswordPolicyError> {
        let password = self.0.to_lowercase();

        for (name, value) in attributes {
            let value = value.trim().to_lowercase();
            if value.chars().count() < MIN_SIMILARITY_ATTRIBUTE_LENGTH {
                continue;
            }
            if password.contains(&value) || value.contains(&password) {
                return Err(PasswordPolicyError::TooSimilar {
                    attribute: (*name).replace('_', " "),
                });
            }
        }

        Ok(())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id and a fresh 128-bit salt
    ///
    /// `pepper` is an optional application-wide secret appended before
    /// hashing; the same pepper must be passed to [`HashedPassword::verify`].
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut password_bytes = self.peppered(pepper);
        let salt = SaltString::generate(OsRng);

        let result = Argon2::default()
            .hash_password(&password_bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        password_bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format (algorithm, params, salt, hash)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a PHC string read back from storage
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Constant-time verification (inside argon2)
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut password_bytes = password.peppered(pepper);
        let valid = Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok();
        password_bytes.zeroize();
        valid
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_password(password: &str) -> bool {
    let lower = password.to_lowercase();

    if COMMON_PASSWORDS.contains(&lower.as_str()) {
        return true;
    }

    // A single repeated character, e.g. "aaaaaaaa"
    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    KEYBOARD_RUNS.iter().any(|run| run.contains(lower.as_str()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short1".to_string());
        assert!(matches!(
            result,
            Err(PasswordPolicyError::TooShort { min: 8, actual: 6 })
        ));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "ab".repeat(MAX_PASSWORD_LENGTH);
        let result = ClearTextPassword::new(long_password);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_blank() {
        assert!(matches!(
            ClearTextPassword::new("".to_string()),
            Err(PasswordPolicyError::Blank)
        ));
        assert!(matches!(
            ClearTextPassword::new("         ".to_string()),
            Err(PasswordPolicyError::Blank)
        ));
    }

    #[test]
    fn test_password_entirely_numeric() {
        let result = ClearTextPassword::new("48291736".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EntirelyNumeric)));
    }

    #[test]
    fn test_password_too_common() {
        for common in ["password123", "Password", "aaaaaaaaaa", "asdfghjkl"] {
            let result = ClearTextPassword::new(common.to_string());
            assert!(
                matches!(result, Err(PasswordPolicyError::TooCommon)),
                "{common} should be rejected"
            );
        }
    }

    #[test]
    fn test_password_similarity() {
        let password = ClearTextPassword::new("alice-in-wonderland".to_string()).unwrap();
        let result = password.check_similarity(&[("username", "Alice")]);
        assert_eq!(
            result,
            Err(PasswordPolicyError::TooSimilar {
                attribute: "username".to_string()
            })
        );

        // Short attributes are ignored
        assert!(password.check_similarity(&[("first_name", "Al")]).is_ok());
        assert!(password.check_similarity(&[("username", "bob")]).is_ok());
    }

    #[test]
    fn test_similarity_message_names_attribute() {
        let err = PasswordPolicyError::TooSimilar {
            attribute: "first name".to_string(),
        };
        assert_eq!(err.to_string(), "The password is too similar to the first name.");
    }

    #[test]
    fn test_valid_passwords() {
        assert!(ClearTextPassword::new("MySecure#Pass2024!".to_string()).is_ok());
        assert!(ClearTextPassword::new("パスワード安全です!".to_string()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(None).unwrap();

        assert!(hashed.verify(&password, None));

        let wrong = ClearTextPassword::for_verification("WrongPassword123!".to_string());
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let pepper = b"my_secret_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.as_phc_string().starts_with("$argon2id$"));
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_verification_input_skips_policy() {
        // Too short to be set, but must still be checkable
        let attempt = ClearTextPassword::for_verification("123".to_string());
        let hashed = ClearTextPassword::new("TestPassword123!".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        assert!(!hashed.verify(&attempt, None));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }
}
