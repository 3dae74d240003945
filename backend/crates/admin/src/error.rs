//! Admin Error Types
//!
//! This module provides admin-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Admin-specific result type alias
pub type AdminResult<T> = Result<T, AdminError>;

/// Admin-specific error variants
#[derive(Debug, Error)]
pub enum AdminError {
    /// No valid admin session
    #[error("Unauthorized")]
    Unauthorized,

    /// Wrong username or password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Required request field missing
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Credential update carried nothing to change
    #[error("No changes provided")]
    NoChanges,

    /// Current password did not match on credential update
    #[error("Invalid current password")]
    WrongCurrentPassword,

    /// New credential rejected by policy
    #[error("{0}")]
    Validation(String),

    /// Credential file could not be read or written
    #[error("Admin record storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Credential file exists but cannot be understood
    #[error("Admin record is corrupt: {0}")]
    CorruptRecord(String),

    /// Key derivation failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdminError::Unauthorized | AdminError::InvalidCredentials => ErrorKind::Unauthorized,
            AdminError::MissingField(_) | AdminError::NoChanges | AdminError::Validation(_) => {
                ErrorKind::BadRequest
            }
            AdminError::WrongCurrentPassword => ErrorKind::Forbidden,
            AdminError::Storage(_)
            | AdminError::CorruptRecord(_)
            | AdminError::Hashing(_)
            | AdminError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AdminError::Storage(e) => {
                tracing::error!(error = %e, "Admin record storage error");
            }
            AdminError::CorruptRecord(reason) => {
                tracing::error!(reason = %reason, "Admin record is corrupt");
            }
            AdminError::Hashing(msg) | AdminError::Internal(msg) => {
                tracing::error!(message = %msg, "Admin internal error");
            }
            AdminError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AdminError::WrongCurrentPassword => {
                tracing::warn!("Credential update with wrong current password");
            }
            _ => {
                tracing::debug!(error = %self, "Admin error");
            }
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::password::PasswordHashError> for AdminError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AdminError::Hashing(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AdminError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AdminError::Validation(err.to_string())
    }
}

impl From<crate::domain::session_token::TokenError> for AdminError {
    fn from(err: crate::domain::session_token::TokenError) -> Self {
        AdminError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AdminError {
    fn from(err: tokio::task::JoinError) -> Self {
        AdminError::Internal(format!("Hashing task failed: {err}"))
    }
}
