//! API DTOs (Data Transfer Objects)
//!
//! Write bodies are read field by field with [`FieldReader`] so every
//! failing field is reported in one response.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::validation::{FieldErrors, FieldReader, WriteMode, messages};
use serde::Serialize;
use serde_json::Value;

use crate::application::{IssueTokenInput, IssueTokenOutput, UserInput};
use crate::domain::entity::user::User;
use crate::domain::value_object::{
    email::Email, person_name::PersonName, user_name::UserName, user_password::RawPassword,
};

// ============================================================================
// Token
// ============================================================================

/// Read `{"username", "password"}` for a token request
pub fn parse_token_request(body: &Value) -> Result<IssueTokenInput, FieldErrors> {
    let mut reader = FieldReader::new(body, WriteMode::Create)?;

    let user_name = reader.required_string("username");
    let password = reader.required_string("password");

    for (field, value) in [("username", &user_name), ("password", &password)] {
        if value.as_deref().is_some_and(str::is_empty) {
            reader.reject(field, messages::BLANK);
        }
    }
    reader.finish()?;

    match (user_name, password) {
        (Some(user_name), Some(password)) => Ok(IssueTokenInput {
            user_name,
            password,
        }),
        // finish() already reported the missing fields
        _ => Err(FieldErrors::single("username", messages::REQUIRED)),
    }
}

/// Token response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssueTokenOutput> for TokenResponse {
    fn from(output: IssueTokenOutput) -> Self {
        Self {
            token: output.token.expose().to_string(),
            expires_at: output.expires_at,
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// Read a user write body
///
/// `password` is required on create only; on replace it may be left out to
/// keep the current one.
pub fn parse_user_input(body: &Value, mode: WriteMode) -> Result<UserInput, FieldErrors> {
    let mut reader = FieldReader::new(body, mode)?;
    let mut input = UserInput::default();

    if let Some(raw) = reader.required_string("username") {
        match UserName::new(&raw) {
            Ok(user_name) => input.user_name = Some(user_name),
            Err(e) => reader.reject("username", e.to_string()),
        }
    }

    let password = if mode == WriteMode::Create {
        reader.required_string("password")
    } else {
        reader.optional_string("password")
    };
    if let Some(raw) = password {
        match RawPassword::new(raw) {
            Ok(password) => input.password = Some(password),
            Err(e) => reader.reject("password", e.to_string()),
        }
    }

    if let Some(raw) = reader.optional_string("email") {
        match Email::new(&raw) {
            Ok(email) => input.email = Some(email),
            Err(e) => reader.reject("email", e.to_string()),
        }
    }

    for field in ["first_name", "last_name"] {
        if let Some(raw) = reader.optional_string(field) {
            match PersonName::new(raw) {
                Ok(name) if field == "first_name" => input.first_name = Some(name),
                Ok(name) => input.last_name = Some(name),
                Err(e) => reader.reject(field, e.to_string()),
            }
        }
    }

    input.is_active = reader.optional_bool("is_active");
    input.is_staff = reader.optional_bool("is_staff");

    reader.finish()?;
    Ok(input)
}

/// User as returned by the API; the credential never leaves the server
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.user_name.into_inner(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            date_joined: user.date_joined,
            last_login: user.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::validation::NON_FIELD_ERRORS;
    use serde_json::json;

    #[test]
    fn test_token_request() {
        let input =
            parse_token_request(&json!({ "username": "alice", "password": "pw" })).unwrap();
        assert_eq!(input.user_name, "alice");
        assert_eq!(input.password, "pw");
    }

    #[test]
    fn test_token_request_missing_and_blank() {
        let errors = parse_token_request(&json!({ "username": "" })).unwrap_err();
        assert_eq!(errors.get("username").unwrap(), [messages::BLANK.to_string()]);
        assert_eq!(errors.get("password").unwrap(), [messages::REQUIRED.to_string()]);
    }

    #[test]
    fn test_token_request_not_an_object() {
        let errors = parse_token_request(&json!("alice")).unwrap_err();
        assert!(errors.contains(NON_FIELD_ERRORS));
    }

    #[test]
    fn test_user_create_requires_username_and_password() {
        let errors = parse_user_input(&json!({}), WriteMode::Create).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password", "username"]);
    }

    #[test]
    fn test_user_replace_allows_missing_password() {
        let input = parse_user_input(&json!({ "username": "alice" }), WriteMode::Replace).unwrap();
        assert!(input.password.is_none());

        let errors = parse_user_input(&json!({}), WriteMode::Replace).unwrap_err();
        assert!(errors.contains("username"));
    }

    #[test]
    fn test_user_partial_reads_only_given_fields() {
        let input =
            parse_user_input(&json!({ "is_staff": true, "id": 99 }), WriteMode::Partial).unwrap();
        assert_eq!(input.is_staff, Some(true));
        assert!(input.user_name.is_none());
        assert!(input.email.is_none());
    }

    #[test]
    fn test_user_field_errors_are_collected() {
        let body = json!({
            "username": "not valid!",
            "password": "short",
            "email": "nope",
            "last_name": "x".repeat(151),
            "is_active": "perhaps",
        });
        let errors = parse_user_input(&body, WriteMode::Create).unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["email", "is_active", "last_name", "password", "username"]
        );
        assert_eq!(
            errors.get("email").unwrap(),
            ["Enter a valid email address.".to_string()]
        );
    }

    #[test]
    fn test_user_names_reject_null_character() {
        let body = json!({ "first_name": "Al\u{0}ice", "last_name": "Smith" });
        let errors = parse_user_input(&body, WriteMode::Partial).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["first_name"]);
        assert_eq!(
            errors.get("first_name").unwrap(),
            [messages::NULL_CHARACTER.to_string()]
        );
    }

    #[test]
    fn test_user_response_has_no_credential() {
        let raw = RawPassword::new("correct-horse-battery".to_string()).unwrap();
        let user = crate::domain::entity::user::NewUser::new(
            UserName::new("alice").unwrap(),
            crate::domain::value_object::user_password::UserPassword::from_raw(&raw, None)
                .unwrap(),
        )
        .into_user(UserId::from_i64(1), Utc::now());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["username"], "alice");
        assert!(json.get("password").is_none());
        assert!(json.get("credential_hash").is_none());
        assert!(json["last_login"].is_null());
    }
}
