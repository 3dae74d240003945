//! Admin Middleware
//!
//! Gate for routes that require the admin session.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::domain::repository::CredentialRepository;
use crate::error::AdminError;
use crate::presentation::handlers::AdminAppState;

/// Middleware that requires a valid admin session
///
/// Use with `axum::middleware::from_fn_with_state`. Rejected requests get
/// 401 `{"error":"Unauthorized"}` and never reach the inner handler.
pub async fn require_admin<R>(
    State(state): State<AdminAppState<R>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    if !state.check_session().require_admin(req.headers()).await {
        tracing::debug!(path = %req.uri().path(), "Admin session required");
        return Err(AdminError::Unauthorized.into_response());
    }

    Ok(next.run(req).await)
}
