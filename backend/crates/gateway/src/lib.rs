//! Gateway (Core Proxy) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Proxy request/response, Core error, transport trait
//! - `application/` - Core client, fallback combinator, resource use cases
//! - `infra/` - reqwest transport
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Apps / tenants listing and creation with modern → legacy endpoint fallback
//! - User listing, lookup, creation and deletion
//! - Core health probe
//! - Catch-all forwarding of `/api/core/*` to the Core
//!
//! Every route expects to sit behind `admin::require_admin`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CoreConfig;
pub use error::{GatewayError, GatewayResult};
pub use infra::http::ReqwestTransport;
pub use presentation::handlers::GatewayAppState;
pub use presentation::router::core_router_generic;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::core_error::*;
    pub use crate::domain::proxy::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
