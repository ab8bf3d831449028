//! User Name Value Object
//!
//! ユーザー名は、アカウントを識別するための**ログイン用ハンドル**。
//! トークン発行時の照合とユーザー管理に使用される。
//!
//! ## 設計方針
//! - NFKC正規化 → 検証 の順で処理
//! - 大文字・小文字は区別し、入力どおり保持する
//!
//! ## 不変条件
//! - 長さ: 1〜150文字（正規化後）
//! - 英数字（Unicode の文字・数字を含む）と `@ . + - _` のみ

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 150;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['@', '.', '+', '-', '_'];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// Empty after normalization
    Blank,

    /// Longer than USER_NAME_MAX_LENGTH
    TooLong { length: usize, max: usize },

    /// Contains a character outside the allowed set
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "This field may not be blank."),
            Self::TooLong { max, .. } => {
                write!(f, "Ensure this field has no more than {max} characters.")
            }
            Self::InvalidCharacter { .. } => write!(
                f,
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
            ),
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized user name
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Normalize (NFKC) and validate raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized = Self::normalize(input.as_ref());
        Self::validate(&normalized)?;
        Ok(Self(normalized))
    }

    /// Rebuild from a stored value (already validated on write)
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    /// NFKC form used for lookups, without validation
    pub fn normalize(input: &str) -> String {
        input.nfkc().collect()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(normalized: &str) -> Result<(), UserNameError> {
        if normalized.trim().is_empty() {
            return Err(UserNameError::Blank);
        }

        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for (position, ch) in normalized.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(UserNameError::InvalidCharacter { char: ch, position });
            }
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Tests
// ============================================================================
