//! Transport Trait
//!
//! Interface for sending requests to the Core. Implementation is in infrastructure layer.

use crate::domain::core_error::CoreError;
use crate::domain::proxy::{ProxyRequest, ProxyResponse};

/// Core transport trait
///
/// Implementations return any upstream status as a response; only
/// connection-level failures are errors.
#[trait_variant::make(CoreTransport: Send)]
pub trait LocalCoreTransport {
    async fn send(&self, request: ProxyRequest) -> Result<ProxyResponse, CoreError>;
}
