//! Gateway Error Types
//!
//! This module provides gateway-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::core_error::CoreError;

/// Gateway-specific result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway-specific error variants
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request rejected before any upstream call
    #[error("{0}")]
    Validation(String),

    /// Every candidate reported the resource missing and no default exists
    #[error("{0}")]
    NotFound(String),

    /// Upstream failure; message already carries context
    #[error("{0}")]
    Upstream(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    /// Upstream failure with a context prefix, e.g. `Create app failed: <msg>`
    pub fn upstream(context: &str, err: &CoreError) -> Self {
        GatewayError::Upstream(format!("{context}: {err}"))
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Validation(_) => ErrorKind::BadRequest,
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::Upstream(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GatewayError::Upstream(msg) => {
                tracing::error!(message = %msg, "Core call failed");
            }
            GatewayError::NotFound(msg) => {
                tracing::info!(message = %msg, "Core resource not found");
            }
            GatewayError::Validation(msg) => {
                tracing::debug!(message = %msg, "Gateway request rejected");
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<CoreError> for GatewayError {
    fn from(err: CoreError) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}
