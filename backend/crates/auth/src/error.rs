//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User name already exists
    #[error("User name already exists")]
    UserNameTaken,

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Invalid credentials (unknown email or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Staff account attempted the applicant flow
    #[error("Staff accounts must use the admin sign-in")]
    StaffRedirect,

    /// Account is disabled
    #[error("Account is disabled")]
    AccountDisabled,

    /// Code dispatch quota exceeded
    #[error("Too many codes requested, try again later")]
    RateLimited,

    /// Code email could not be delivered
    #[error("Could not send verification code")]
    DispatchFailed,

    /// Code submitted with no live pending sign-in
    #[error("Sign-in expired, start over")]
    SessionExpired,

    /// Pending sign-in exists but the device record is gone
    #[error("Verification device not found, start over")]
    DeviceMissing,

    /// Account is locked (too many failed code attempts)
    #[error("Account is temporarily locked")]
    AccountLocked,

    /// Submitted code did not verify
    #[error("Invalid verification code")]
    InvalidCode,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Session fingerprint mismatch
    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Input validation error (user name, email)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNameTaken | AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::StaffRedirect => StatusCode::FORBIDDEN,
            AuthError::AccountDisabled => StatusCode::FORBIDDEN,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::DispatchFailed => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::SessionExpired => StatusCode::UNAUTHORIZED,
            AuthError::DeviceMissing => StatusCode::CONFLICT,
            AuthError::AccountLocked => StatusCode::LOCKED,
            AuthError::InvalidCode => StatusCode::UNAUTHORIZED,
            AuthError::SessionInvalid | AuthError::SessionFingerprintMismatch => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::MissingHeader(_)
            | AuthError::Validation(_)
            | AuthError::PasswordValidation(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNameTaken | AuthError::EmailTaken | AuthError::DeviceMissing => {
                ErrorKind::Conflict
            }
            AuthError::InvalidCredentials
            | AuthError::SessionExpired
            | AuthError::InvalidCode
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::StaffRedirect | AuthError::AccountDisabled => ErrorKind::Forbidden,
            AuthError::RateLimited => ErrorKind::TooManyRequests,
            AuthError::DispatchFailed => ErrorKind::ServiceUnavailable,
            AuthError::AccountLocked => ErrorKind::Locked,
            AuthError::MissingHeader(_)
            | AuthError::Validation(_)
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::DispatchFailed => {
                tracing::error!("Verification code dispatch failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked => {
                tracing::warn!("Code attempt on locked account");
            }
            AuthError::RateLimited => {
                tracing::warn!("Code dispatch rate limit hit");
            }
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
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
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::client::FingerprintError> for AuthError {
    fn from(err: platform::client::FingerprintError) -> Self {
        match err {
            platform::client::FingerprintError::MissingHeader(header) => {
                AuthError::MissingHeader(header)
            }
        }
    }
}
