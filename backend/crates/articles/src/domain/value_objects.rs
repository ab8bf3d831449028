//! Domain Value Objects
//!
//! Validated article fields. Values are stored exactly as given.

use kernel::validation::messages;
use std::fmt;

/// Maximum title length in characters (Unicode scalar values)
pub const TITLE_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValueError {
    Blank,
    TooLong { max: usize },
    NullCharacter,
}

impl fmt::Display for FieldValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => f.write_str(messages::BLANK),
            Self::TooLong { max } => f.write_str(&messages::max_length(*max)),
            Self::NullCharacter => f.write_str(messages::NULL_CHARACTER),
        }
    }
}

impl std::error::Error for FieldValueError {}

fn check_text(value: &str) -> Result<(), FieldValueError> {
    if value.contains('\0') {
        return Err(FieldValueError::NullCharacter);
    }
    if value.trim().is_empty() {
        return Err(FieldValueError::Blank);
    }
    Ok(())
}

/// Article title: non-blank, at most [`TITLE_MAX_LENGTH`] characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldValueError> {
        let value = value.into();
        check_text(&value)?;
        if value.chars().count() > TITLE_MAX_LENGTH {
            return Err(FieldValueError::TooLong {
                max: TITLE_MAX_LENGTH,
            });
        }
        Ok(Self(value))
    }

    /// Rebuild from a stored value (already validated on write)
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Article body text: non-blank, unbounded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleDescription(String);

impl ArticleDescription {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldValueError> {
        let value = value.into();
        check_text(&value)?;
        Ok(Self(value))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
