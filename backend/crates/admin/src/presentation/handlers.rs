//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use platform::extract::LenientJson;
use std::sync::Arc;

use crate::application::config::AdminConfig;
use crate::application::{
    CheckSessionUseCase, CredentialStore, SessionManager, SignInInput, SignInUseCase,
    UpdateCredentialsInput, UpdateCredentialsUseCase,
};
use crate::domain::repository::CredentialRepository;
use crate::error::{AdminError, AdminResult};
use crate::presentation::dto::{
    LoginRequest, OkResponse, SessionStatusResponse, UpdateCredentialsRequest,
    UpdateCredentialsResponse,
};

/// Shared state for admin handlers and the admin gate
#[derive(Clone)]
pub struct AdminAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AdminConfig>,
}

impl<R> AdminAppState<R>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AdminConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> CredentialStore<R> {
        CredentialStore::new(self.repo.clone(), self.config.clone())
    }

    pub fn sessions(&self) -> SessionManager {
        SessionManager::new(self.config.clone())
    }

    pub fn check_session(&self) -> CheckSessionUseCase<R> {
        CheckSessionUseCase::new(self.store(), self.sessions())
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AdminAppState<R>>,
    LenientJson(req): LenientJson<LoginRequest>,
) -> AdminResult<impl IntoResponse>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.store(), state.sessions());

    let input = SignInInput {
        username: req.username.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, output.set_cookie)],
        Json(OkResponse::ok()),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(State(state): State<AdminAppState<R>>) -> impl IntoResponse
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.sessions().destroy_session();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(OkResponse::ok()),
    )
}

// ============================================================================
// Credentials
// ============================================================================

/// POST /api/auth/credentials
pub async fn update_credentials<R>(
    State(state): State<AdminAppState<R>>,
    headers: HeaderMap,
    LenientJson(req): LenientJson<UpdateCredentialsRequest>,
) -> AdminResult<Response>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    if !state.check_session().require_admin(&headers).await {
        return Err(AdminError::Unauthorized);
    }

    let use_case = UpdateCredentialsUseCase::new(state.store());

    let input = UpdateCredentialsInput {
        current_password: req.current_password,
        new_username: req.new_username,
        new_password: req.new_password,
    };

    let output = use_case.execute(input).await?;

    let body = Json(UpdateCredentialsResponse {
        ok: true,
        username: output.username,
    });

    // The caller's cookie was signed with the old key
    if output.password_changed {
        let cookie = state.sessions().destroy_session();
        return Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], body).into_response());
    }

    Ok((StatusCode::OK, body).into_response())
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R>(
    State(state): State<AdminAppState<R>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: CredentialRepository + Clone + Send + Sync + 'static,
{
    let status = state.check_session().status(&headers).await;

    Json(SessionStatusResponse {
        authenticated: status.authenticated,
        username: status.username,
    })
}
