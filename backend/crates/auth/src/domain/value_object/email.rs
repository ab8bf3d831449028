//! Email Value Object
//!
//! An optional contact address. The empty string means "no address".
//! Basic format validation only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Error returned for a malformed address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    TooLong { max: usize },
    InvalidFormat,
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { max } => {
                write!(f, "Ensure this field has no more than {max} characters.")
            }
            Self::InvalidFormat => write!(f, "Enter a valid email address."),
        }
    }
}

impl std::error::Error for EmailError {}

/// Email address value object
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Validate an address; blank input yields [`Email::empty`]
    ///
    /// The domain part is lowercased, the local part is kept as typed.
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = email.as_ref().trim();

        if email.is_empty() {
            return Ok(Self::empty());
        }

        if email.chars().count() > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: EMAIL_MAX_LENGTH,
            });
        }

        let Some((local, domain)) = email.rsplit_once('@') else {
            return Err(EmailError::InvalidFormat);
        };

        if !Self::is_valid_local(local) || !Self::is_valid_domain(domain) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }

    /// No address on file
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Rebuild from a stored value (already validated on write)
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid_local(local: &str) -> bool {
        !local.is_empty()
            && local.len() <= 64
            && !local.contains('@')
            && !local.chars().any(|c| c.is_whitespace() || c.is_control())
    }

    fn is_valid_domain(domain: &str) -> bool {
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = Email::new("Alice.Smith@Example.COM").unwrap();
        assert_eq!(email.as_str(), "Alice.Smith@example.com");
    }

    #[test]
    fn test_blank_is_empty() {
        assert!(Email::new("").unwrap().is_empty());
        assert!(Email::new("   ").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_email() {
        for bad in [
            "invalid",
            "@example.com",
            "user@",
            "user@nodot",
            "user@.example.com",
            "user@example..com",
            "user@-example.com",
            "us er@example.com",
        ] {
            assert_eq!(Email::new(bad), Err(EmailError::InvalidFormat), "{bad}");
        }
    }

    #[test]
    fn test_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(Email::new(long), Err(EmailError::TooLong { .. })));
    }

    #[test]
    fn test_message() {
        assert_eq!(
            EmailError::InvalidFormat.to_string(),
            "Enter a valid email address."
        );
    }
}
