//! First/last name fields. Free text, may be empty.

use kernel::validation::messages;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PERSON_NAME_MAX_LENGTH: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonNameError {
    TooLong { max: usize },
    NullCharacter,
}

impl fmt::Display for PersonNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { max } => {
                write!(f, "Ensure this field has no more than {max} characters.")
            }
            Self::NullCharacter => f.write_str(messages::NULL_CHARACTER),
        }
    }
}

impl std::error::Error for PersonNameError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(value: impl Into<String>) -> Result<Self, PersonNameError> {
        let value = value.into();
        if value.contains('\0') {
            return Err(PersonNameError::NullCharacter);
        }
        if value.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                max: PERSON_NAME_MAX_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_limit() {
        assert!(PersonName::new("").is_ok());
        assert!(PersonName::new("x".repeat(150)).is_ok());
        assert_eq!(
            PersonName::new("x".repeat(151)).unwrap_err().to_string(),
            "Ensure this field has no more than 150 characters."
        );
    }

    #[test]
    fn test_null_character_is_rejected() {
        assert_eq!(PersonName::new("Al\0ice"), Err(PersonNameError::NullCharacter));
        assert_eq!(
            PersonNameError::NullCharacter.to_string(),
            "Null characters are not allowed."
        );
    }
}
