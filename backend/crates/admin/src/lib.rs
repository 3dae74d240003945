//! Admin (Console Account) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Admin record, session token, repository trait
//! - `application/` - Credential store, session manager, use cases
//! - `infra/` - File-backed credential repository
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Single admin account bootstrapped from configuration
//! - Login/logout with an HS256 session cookie (2 hour lifetime)
//! - Credential rotation guarded by the current password
//! - `require_admin` route layer for every protected endpoint
//!
//! ## Security Model
//! - Passwords hashed with scrypt and a per-password random salt
//! - Session tokens are signed with a key derived from the stored password
//!   digest: rotating the password invalidates every outstanding session
//! - Session cookies are HttpOnly, SameSite=Lax, Secure outside development

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AdminConfig;
pub use error::{AdminError, AdminResult};
pub use infra::file::FileCredentialRepository;
pub use presentation::handlers::AdminAppState;
pub use presentation::middleware::require_admin;
pub use presentation::router::admin_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::admin_record::*;
    pub use crate::domain::session_token::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::application::credentials::CredentialStore;
    pub use crate::infra::file::FileCredentialRepository as AdminStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
