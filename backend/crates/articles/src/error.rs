//! Article Error Types

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use kernel::validation::FieldErrors;
use thiserror::Error;

/// Article-specific result type alias
pub type ArticleResult<T> = Result<T, ArticleError>;

#[derive(Debug, Error)]
pub enum ArticleError {
    /// One or more fields failed validation
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),

    /// Body was not JSON, or not sent as JSON
    #[error("Unreadable request body: {0}")]
    Body(#[from] JsonRejection),

    /// Query string did not match the expected filters
    #[error("Invalid query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("Not found.")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArticleError {
    /// Status of the rendered response
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ArticleError::Validation(_) => ErrorKind::BadRequest,
            ArticleError::Body(JsonRejection::MissingJsonContentType(_)) => {
                ErrorKind::UnsupportedMediaType
            }
            ArticleError::Body(_) | ArticleError::Query(_) => ErrorKind::BadRequest,
            ArticleError::NotFound => ErrorKind::NotFound,
            ArticleError::Database(err) => sqlx_error_kind(err),
            ArticleError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            ArticleError::Validation(errors) => AppError::validation(errors),
            ArticleError::Body(rejection) => AppError::from(rejection),
            ArticleError::Query(rejection) => AppError::from(rejection),
            ArticleError::NotFound => AppError::not_found("Not found."),
            ArticleError::Database(err) => AppError::from(err),
            ArticleError::Internal(_) => AppError::internal("A server error occurred."),
        }
    }

    fn log(&self) {
        match self {
            ArticleError::Database(e) => {
                tracing::error!(error = %e, "Article database error");
            }
            ArticleError::Internal(msg) => {
                tracing::error!(message = %msg, "Article internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Article request rejected");
            }
        }
    }
}

impl IntoResponse for ArticleError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<ArticleError> for AppError {
    fn from(err: ArticleError) -> Self {
        err.into_app_error()
    }
}

impl From<FieldErrors> for ArticleError {
    fn from(errors: FieldErrors) -> Self {
        ArticleError::Validation(errors)
    }
}
