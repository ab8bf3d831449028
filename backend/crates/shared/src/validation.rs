//! Field-level validation
//!
//! [`FieldErrors`] collects caller-facing messages keyed by field name, and
//! [`FieldReader`] pulls typed values out of a JSON object body while
//! recording every problem it finds, so one response can report all
//! failing fields at once.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Key used for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Standard messages
pub mod messages {
    pub const REQUIRED: &str = "This field is required.";
    pub const NULL: &str = "This field may not be null.";
    pub const BLANK: &str = "This field may not be blank.";
    pub const INVALID_STRING: &str = "Not a valid string.";
    pub const INVALID_BOOLEAN: &str = "Must be a valid boolean.";
    /// PostgreSQL text columns cannot hold U+0000
    pub const NULL_CHARACTER: &str = "Null characters are not allowed.";

    pub fn max_length(max: usize) -> String {
        format!("Ensure this field has no more than {max} characters.")
    }
}

// ============================================================================
// FieldErrors
// ============================================================================

/// Validation messages grouped by field, serialized as `{"field": ["msg"]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors with a single message for a single field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Field names in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// ============================================================================
// Write mode
// ============================================================================

/// How a write body is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// POST: required fields must be present
    Create,
    /// PUT: full replacement, required fields must be present
    Replace,
    /// PATCH: any subset of fields
    Partial,
}

impl WriteMode {
    #[inline]
    pub const fn is_partial(self) -> bool {
        matches!(self, WriteMode::Partial)
    }
}

// ============================================================================
// FieldReader
// ============================================================================

/// Reads fields out of a JSON object body, collecting errors as it goes
///
/// ```rust
/// use kernel::validation::{FieldReader, WriteMode};
/// use serde_json::json;
///
/// let body = json!({ "title": "Hello" });
/// let mut reader = FieldReader::new(&body, WriteMode::Create).unwrap();
/// assert_eq!(reader.required_string("title").as_deref(), Some("Hello"));
/// assert!(reader.required_string("description").is_none());
///
/// let errors = reader.finish().unwrap_err();
/// assert!(errors.contains("description"));
/// ```
pub struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    mode: WriteMode,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    /// Fails unless the body is a JSON object
    pub fn new(body: &'a Value, mode: WriteMode) -> Result<Self, FieldErrors> {
        match body {
            Value::Object(object) => Ok(Self {
                object,
                mode,
                errors: FieldErrors::new(),
            }),
            other => Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(other)
                ),
            )),
        }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// A string the record cannot exist without
    ///
    /// Missing is an error unless the mode is partial.
    pub fn required_string(&mut self, field: &str) -> Option<String> {
        match self.object.get(field) {
            None => {
                if !self.mode.is_partial() {
                    self.errors.add(field, messages::REQUIRED);
                }
                None
            }
            Some(value) => self.coerce_string(field, value),
        }
    }

    /// A string that may be left out in every mode
    pub fn optional_string(&mut self, field: &str) -> Option<String> {
        let value = self.object.get(field)?;
        self.coerce_string(field, value)
    }

    /// A boolean that may be left out in every mode
    ///
    /// Accepts JSON booleans plus the usual form encodings
    /// (`"true"`, `"false"`, `1`, `0`, ...).
    pub fn optional_bool(&mut self, field: &str) -> Option<bool> {
        let value = self.object.get(field)?;
        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
            Value::Null => {
                self.errors.add(field, messages::NULL);
                return None;
            }
            _ => None,
        };

        if parsed.is_none() {
            self.errors.add(field, messages::INVALID_BOOLEAN);
        }
        parsed
    }

    /// Record a domain-level failure for a field
    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// `Err` with everything recorded, if anything was
    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }

    fn coerce_string(&mut self, field: &str, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            // Numbers are accepted as their textual form
            Value::Number(n) => Some(n.to_string()),
            Value::Null => {
                self.errors.add(field, messages::NULL);
                None
            }
            _ => {
                self.errors.add(field, messages::INVALID_STRING);
                None
            }
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
