//! Users Use Case
//!
//! Listing, lookup, creation and deletion of Core users.

use serde_json::{Value, json};

use crate::application::client::{CallOptions, CoreClient, encode_segment};
use crate::application::fallback::{Candidate, Outcome, attempt_in_order};
use crate::domain::core_error::CoreError;
use crate::domain::transport::CoreTransport;
use crate::error::{GatewayError, GatewayResult};

/// Page size when the caller gives none
pub const DEFAULT_LIMIT: u32 = 50;

/// List users input
#[derive(Debug, Default)]
pub struct ListUsersInput {
    pub limit: Option<String>,
    pub pagination_token: Option<String>,
    pub tenant_id: Option<String>,
}

/// Create user input
#[derive(Debug, Default)]
pub struct CreateUserInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub tenant_id: Option<String>,
}

/// Users use case
pub struct UsersUseCase<T>
where
    T: CoreTransport,
{
    client: CoreClient<T>,
}

impl<T> UsersUseCase<T>
where
    T: CoreTransport,
{
    pub fn new(client: CoreClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self, input: ListUsersInput) -> GatewayResult<Value> {
        let limit = match input.limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_LIMIT,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| GatewayError::validation("limit must be a positive integer"))?,
        };

        let options = CallOptions::get()
            .query("limit", limit)
            .query_opt("paginationToken", input.pagination_token)
            .query_opt("tenantId", input.tenant_id);

        Ok(self.client.call("/users", options).await?)
    }

    /// Look a user up by id
    ///
    /// Direct lookup, then a filtered listing, then metadata only.
    pub async fn get(&self, user_id: &str) -> GatewayResult<Value> {
        let candidates = vec![
            Candidate::new(
                "/user/id",
                CallOptions::get().query("userId", user_id),
            )
            .with_shape(direct_lookup(user_id.to_string())),
            Candidate::new(
                "/users",
                CallOptions::get().query("userId", user_id),
            )
            .with_shape(pick_from_listing(user_id.to_string())),
            Candidate::new(
                "/recipe/user/metadata",
                CallOptions::get().query("userId", user_id),
            )
            .with_shape(metadata_only(user_id.to_string())),
        ];

        match attempt_in_order(&self.client, candidates, CoreError::is_not_found).await {
            Outcome::Success(user) => Ok(user),
            Outcome::NotFound(_) => Err(GatewayError::NotFound(format!("User {user_id} not found"))),
            Outcome::Failed(e) => Err(GatewayError::upstream("Failed to fetch user", &e)),
        }
    }

    pub async fn create(&self, input: CreateUserInput) -> GatewayResult<Value> {
        let (Some(email), Some(password)) = (
            input.email.filter(|v| !v.is_empty()),
            input.password.filter(|v| !v.is_empty()),
        ) else {
            return Err(GatewayError::validation("email and password are required"));
        };

        let path = match input.tenant_id.filter(|t| !t.is_empty()) {
            Some(tenant_id) => format!(
                "/tenants/{}/recipe/emailpassword/user/signup",
                encode_segment(&tenant_id)
            ),
            None => "/recipe/emailpassword/user/signup".to_string(),
        };

        let body = json!({ "email": email, "password": password });
        match self.client.call(&path, CallOptions::post(body)).await {
            Ok(created) => {
                tracing::info!(path = %path, "User created on Core");
                Ok(created)
            }
            Err(e) => Err(GatewayError::Upstream(format!(
                "Create user failed: {e}. Ensure emailpassword recipe is enabled for the tenant."
            ))),
        }
    }

    /// Delete a user: REST delete, then the legacy removal call
    pub async fn delete(&self, user_id: &str) -> GatewayResult<Value> {
        let candidates = vec![
            Candidate::new(
                format!("/user/{}", encode_segment(user_id)),
                CallOptions::delete(),
            ),
            Candidate::new("/user/remove", CallOptions::post(json!({ "userId": user_id }))),
        ];

        match attempt_in_order(&self.client, candidates, |_| false).await {
            Outcome::Success(body) => {
                tracing::info!(user_id = %user_id, "User deleted on Core");
                Ok(body)
            }
            Outcome::NotFound(e) | Outcome::Failed(e) => Err(e.into()),
        }
    }
}

/// A Core status other than `OK` in a 200 body means the user is unknown
fn reject_non_ok(body: &Value, user_id: &str) -> Result<(), CoreError> {
    match body.get("status").and_then(Value::as_str) {
        Some(status) if status != "OK" => Err(CoreError::not_found(format!(
            "User {user_id} not found ({status})"
        ))),
        _ => Ok(()),
    }
}

fn direct_lookup(user_id: String) -> impl Fn(Value) -> Result<Value, CoreError> {
    move |body| {
        reject_non_ok(&body, &user_id)?;
        let user = body
            .get("user")
            .filter(|user| !user.is_null())
            .cloned()
            .unwrap_or(body);
        Ok(json!({ "user": user }))
    }
}

fn pick_from_listing(user_id: String) -> impl Fn(Value) -> Result<Value, CoreError> {
    move |body| {
        let entries = body
            .get("users")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        // Entries are either the user itself or `{ recipeId, user }`
        let found = entries.iter().find_map(|entry| {
            let user = entry.get("user").unwrap_or(entry);
            (user.get("id").and_then(Value::as_str) == Some(user_id.as_str())).then(|| user.clone())
        });

        found
            .map(|user| json!({ "user": user }))
            .ok_or_else(|| CoreError::not_found(format!("User {user_id} not found in listing")))
    }
}

fn metadata_only(user_id: String) -> impl Fn(Value) -> Result<Value, CoreError> {
    move |body| {
        reject_non_ok(&body, &user_id)?;
        let metadata = body.get("metadata").cloned().unwrap_or_else(|| json!({}));
        Ok(json!({
            "user": { "id": user_id },
            "metadata": metadata,
            "metadataOnly": true
        }))
    }
}
