//! Gateway Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::transport::CoreTransport;
use crate::presentation::handlers::{self, GatewayAppState};

/// Create the Core router for any transport implementation
pub fn core_router_generic<T>(state: GatewayAppState<T>) -> Router
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/tenants", get(handlers::list_tenants::<T>))
        .route("/tenants/create", post(handlers::create_tenant::<T>))
        .route("/apps", get(handlers::list_apps::<T>))
        .route("/apps/create", post(handlers::create_app::<T>))
        .route("/users", get(handlers::list_users::<T>))
        .route("/users/create", post(handlers::create_user::<T>))
        .route(
            "/users/{user_id}",
            get(handlers::get_user::<T>).delete(handlers::delete_user::<T>),
        )
        .route("/health", get(handlers::health::<T>))
        .route(
            "/{*path}",
            get(handlers::forward::<T>)
                .post(handlers::forward::<T>)
                .put(handlers::forward::<T>)
                .patch(handlers::forward::<T>)
                .delete(handlers::forward::<T>),
        )
        .with_state(state)
}
