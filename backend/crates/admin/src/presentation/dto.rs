//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional: missing values are reported by the use
//! cases with field-specific messages.

use serde::{Deserialize, Serialize};

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Generic success response
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Credential update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialsRequest {
    pub current_password: Option<String>,
    pub new_username: Option<String>,
    pub new_password: Option<String>,
}

/// Credential update response
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCredentialsResponse {
    pub ok: bool,
    pub username: String,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
