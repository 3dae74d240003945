//! Tenants / Apps Use Case
//!
//! Both are flat collections keyed by an id, served by a modern endpoint
//! and a legacy `/multitenancy/*` endpoint.

use serde_json::{Map, Value, json};

use crate::application::client::{CallOptions, CoreClient};
use crate::application::fallback::{Candidate, Outcome, attempt_in_order};
use crate::domain::core_error::CoreError;
use crate::domain::transport::CoreTransport;
use crate::error::{GatewayError, GatewayResult};

/// Id of the implicit tenant/app on a single-tenant Core
pub const DEFAULT_ID: &str = "public";

/// Static description of a Core collection
#[derive(Debug)]
pub struct Collection {
    pub list_paths: [&'static str; 2],
    pub create_paths: [&'static str; 2],
    /// Body field naming the id, e.g. `tenantId`
    pub id_field: &'static str,
    /// Response field holding the default listing
    pub list_field: &'static str,
    /// Response flag reporting the feature as disabled
    pub enabled_flag: &'static str,
    pub default_note: &'static str,
    pub list_error: &'static str,
    pub create_error: &'static str,
}

pub const TENANTS: Collection = Collection {
    list_paths: ["/tenants", "/multitenancy/tenants"],
    create_paths: ["/tenants", "/multitenancy/tenant"],
    id_field: "tenantId",
    list_field: "tenants",
    enabled_flag: "multitenancyEnabled",
    default_note: "Tenants endpoint not found on Core; assuming single-tenant 'public'.",
    list_error: "Failed to fetch tenants",
    create_error: "Create tenant failed",
};

pub const APPS: Collection = Collection {
    list_paths: ["/apps", "/multitenancy/apps"],
    create_paths: ["/apps", "/multitenancy/app"],
    id_field: "appId",
    list_field: "apps",
    enabled_flag: "multiAppEnabled",
    default_note: "Apps endpoint not found on Core; assuming single-app 'public'.",
    list_error: "Failed to fetch apps",
    create_error: "Create app failed",
};

impl Collection {
    /// Listing returned when the Core has no such endpoint at all
    pub fn default_listing(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            self.list_field.to_string(),
            json!([{ self.id_field: DEFAULT_ID }]),
        );
        body.insert(self.enabled_flag.to_string(), Value::Bool(false));
        body.insert("note".to_string(), Value::String(self.default_note.to_string()));
        Value::Object(body)
    }
}

/// Collection use case
pub struct CollectionUseCase<T>
where
    T: CoreTransport,
{
    client: CoreClient<T>,
    collection: &'static Collection,
}

impl<T> CollectionUseCase<T>
where
    T: CoreTransport,
{
    pub fn new(client: CoreClient<T>, collection: &'static Collection) -> Self {
        Self { client, collection }
    }

    /// List entries, falling back to a single default entry when neither
    /// endpoint exists
    pub async fn list(&self) -> GatewayResult<Value> {
        let candidates = self
            .collection
            .list_paths
            .iter()
            .map(|path| Candidate::get(*path))
            .collect();

        match attempt_in_order(&self.client, candidates, CoreError::is_not_found).await {
            Outcome::Success(body) => Ok(body),
            Outcome::NotFound(e) => {
                tracing::info!(
                    collection = self.collection.list_field,
                    error = %e,
                    "Listing endpoint missing on Core; returning default"
                );
                Ok(self.collection.default_listing())
            }
            Outcome::Failed(e) => Err(GatewayError::upstream(self.collection.list_error, &e)),
        }
    }

    /// Create an entry
    ///
    /// Any failure of the modern endpoint moves on to the legacy one.
    pub async fn create(&self, id: Option<String>) -> GatewayResult<Value> {
        let id = id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::validation(format!("{} is required", self.collection.id_field))
            })?;

        let body = json!({ self.collection.id_field: id });
        let candidates = self
            .collection
            .create_paths
            .iter()
            .map(|path| Candidate::new(*path, CallOptions::post(body.clone())))
            .collect();

        match attempt_in_order(&self.client, candidates, |_| false).await {
            Outcome::Success(created) => {
                tracing::info!(collection = self.collection.list_field, id = %id, "Created on Core");
                Ok(created)
            }
            Outcome::NotFound(e) | Outcome::Failed(e) => {
                Err(GatewayError::upstream(self.collection.create_error, &e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listings() {
        assert_eq!(
            TENANTS.default_listing(),
            json!({
                "tenants": [{ "tenantId": "public" }],
                "multitenancyEnabled": false,
                "note": "Tenants endpoint not found on Core; assuming single-tenant 'public'."
            })
        );
        assert_eq!(APPS.default_listing()["apps"], json!([{ "appId": "public" }]));
        assert_eq!(APPS.default_listing()["multiAppEnabled"], json!(false));
    }
}
