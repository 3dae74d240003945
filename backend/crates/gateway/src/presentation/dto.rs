//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Create tenant request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantRequest {
    pub tenant_id: Option<String>,
}

/// Create app request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppRequest {
    pub app_id: Option<String>,
}

/// List users query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub limit: Option<String>,
    pub pagination_token: Option<String>,
    pub tenant_id: Option<String>,
}

/// Create user request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub tenant_id: Option<String>,
}

/// Core health response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub latency_ms: u64,
}
