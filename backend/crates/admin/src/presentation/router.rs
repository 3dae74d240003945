//! Admin Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::CredentialRepository;
use crate::infra::file::FileCredentialRepository;
use crate::presentation::handlers::{self, AdminAppState};

/// Create the Admin router backed by the JSON record file
pub fn admin_router(state: AdminAppState<FileCredentialRepository>) -> Router {
    admin_router_generic(state)
}

/// Create a generic Admin router for any repository implementation
pub fn admin_router_generic<R>(state: AdminAppState<R>) -> Router
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/credentials", post(handlers::update_credentials::<R>))
        .route("/session", get(handlers::session_status::<R>))
        .with_state(state)
}
