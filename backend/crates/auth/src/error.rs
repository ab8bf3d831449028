//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use kernel::validation::{FieldErrors, NON_FIELD_ERRORS};
use platform::bearer::{BearerError, WWW_AUTHENTICATE_VALUE};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message for a rejected token request
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Unable to log in with provided credentials.";

/// Message for a duplicate username
pub const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more request fields failed validation
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// Body was not JSON, or not sent as JSON
    #[error("Unreadable request body: {0}")]
    Body(#[from] JsonRejection),

    /// Username/password pair did not match an account
    #[error("Unable to log in with provided credentials.")]
    InvalidCredentials,

    /// Username already in use
    #[error("A user with that username already exists.")]
    UsernameTaken,

    /// User not found
    #[error("Not found.")]
    UserNotFound,

    /// `Authorization` header missing or malformed
    #[error("{0}")]
    NotAuthenticated(#[from] BearerError),

    /// No token with this key
    #[error("Invalid token.")]
    InvalidToken,

    /// Token past its expiry
    #[error("Token has expired.")]
    TokenExpired,

    /// Token owner deleted or deactivated
    #[error("User inactive or deleted.")]
    UserInactive,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Field errors for a single field
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        AuthError::Validation(FieldErrors::single(field, message))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidCredentials
            | AuthError::UsernameTaken => ErrorKind::BadRequest,
            AuthError::Body(JsonRejection::MissingJsonContentType(_)) => {
                ErrorKind::UnsupportedMediaType
            }
            AuthError::Body(_) => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::NotAuthenticated(_)
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::UserInactive => ErrorKind::Unauthorized,
            AuthError::Database(err) => sqlx_error_kind(err),
            AuthError::PasswordHash(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::validation(errors),
            AuthError::Body(rejection) => AppError::from(rejection),
            AuthError::InvalidCredentials => {
                AppError::validation(FieldErrors::single(NON_FIELD_ERRORS, self.to_string()))
            }
            AuthError::UsernameTaken => {
                AppError::validation(FieldErrors::single("username", USERNAME_TAKEN_MESSAGE))
            }
            AuthError::Database(err) => AppError::from(err),
            // Internal details stay in the log
            AuthError::PasswordHash(_) | AuthError::Internal(_) => {
                AppError::internal("A server error occurred.")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHash(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserInactive => {
                tracing::warn!(error = %self, "Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let unauthorized = self.is_unauthorized();
        let mut response = self.into_app_error().into_response();
        if unauthorized {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(WWW_AUTHENTICATE_VALUE),
            );
        }
        response
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.into_app_error()
    }
}

impl From<FieldErrors> for AuthError {
    fn from(errors: FieldErrors) -> Self {
        AuthError::Validation(errors)
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::PasswordHash(err.to_string())
    }
}
