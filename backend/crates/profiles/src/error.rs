//! Profile Error Types
//!
//! Profile-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Profile-specific result type alias
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Profile-specific error variants
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Profile does not exist or is not visible to the caller
    #[error("Profile not found")]
    NotFound,

    /// Caller lacks the role required for the operation
    #[error("Not allowed")]
    Forbidden,

    /// A live submission already exists for this department
    #[error("A submission for this department already exists")]
    SubmissionExists,

    /// Review action applied to a profile that is not reviewable
    #[error("Profile is not open for review")]
    NotReviewable,

    /// Input validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProfileError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProfileError::NotFound => StatusCode::NOT_FOUND,
            ProfileError::Forbidden => StatusCode::FORBIDDEN,
            ProfileError::SubmissionExists | ProfileError::NotReviewable => StatusCode::CONFLICT,
            ProfileError::Validation(_) => StatusCode::BAD_REQUEST,
            ProfileError::Database(_) | ProfileError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::NotFound => ErrorKind::NotFound,
            ProfileError::Forbidden => ErrorKind::Forbidden,
            ProfileError::SubmissionExists | ProfileError::NotReviewable => ErrorKind::Conflict,
            ProfileError::Validation(_) => ErrorKind::BadRequest,
            ProfileError::Database(_) | ProfileError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ProfileError::Database(e) => {
                tracing::error!(error = %e, "Profile database error");
            }
            ProfileError::Internal(msg) => {
                tracing::error!(message = %msg, "Profile internal error");
            }
            ProfileError::Forbidden => {
                tracing::warn!("Profile access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Profile error");
            }
        }
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ProfileError {
    fn from(err: AppError) -> Self {
        ProfileError::Internal(err.to_string())
    }
}
