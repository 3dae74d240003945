//! HTTP Handlers

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::WithRejection;
use kernel::error::app_error::AppError;
use platform::extract::LenientJson;
use serde_json::Value;
use std::sync::Arc;

use crate::application::config::CoreConfig;
use crate::application::{
    APPS, CollectionUseCase, CoreClient, CreateUserInput, ForwardInput, ForwardUseCase,
    HealthUseCase, ListUsersInput, TENANTS, UsersUseCase,
};
use crate::domain::transport::CoreTransport;
use crate::error::GatewayResult;
use crate::presentation::dto::{
    CreateAppRequest, CreateTenantRequest, CreateUserRequest, HealthResponse, ListUsersQuery,
};

/// Shared state for gateway handlers
#[derive(Clone)]
pub struct GatewayAppState<T>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    pub transport: Arc<T>,
    pub config: Arc<CoreConfig>,
}

impl<T> GatewayAppState<T>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    pub fn new(transport: T, config: CoreConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
        }
    }

    pub fn client(&self) -> CoreClient<T> {
        CoreClient::new(self.transport.clone(), self.config.clone())
    }
}

// ============================================================================
// Tenants
// ============================================================================

/// GET /api/core/tenants
pub async fn list_tenants<T>(State(state): State<GatewayAppState<T>>) -> GatewayResult<Json<Value>>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = CollectionUseCase::new(state.client(), &TENANTS);
    Ok(Json(use_case.list().await?))
}

/// POST /api/core/tenants/create
pub async fn create_tenant<T>(
    State(state): State<GatewayAppState<T>>,
    LenientJson(req): LenientJson<CreateTenantRequest>,
) -> GatewayResult<impl IntoResponse>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = CollectionUseCase::new(state.client(), &TENANTS);
    let created = use_case.create(req.tenant_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ============================================================================
// Apps
// ============================================================================

/// GET /api/core/apps
pub async fn list_apps<T>(State(state): State<GatewayAppState<T>>) -> GatewayResult<Json<Value>>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = CollectionUseCase::new(state.client(), &APPS);
    Ok(Json(use_case.list().await?))
}

/// POST /api/core/apps/create
pub async fn create_app<T>(
    State(state): State<GatewayAppState<T>>,
    LenientJson(req): LenientJson<CreateAppRequest>,
) -> GatewayResult<impl IntoResponse>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = CollectionUseCase::new(state.client(), &APPS);
    let created = use_case.create(req.app_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/core/users
pub async fn list_users<T>(
    State(state): State<GatewayAppState<T>>,
    WithRejection(Query(query), _): WithRejection<Query<ListUsersQuery>, AppError>,
) -> GatewayResult<Json<Value>>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = UsersUseCase::new(state.client());

    let input = ListUsersInput {
        limit: query.limit,
        pagination_token: query.pagination_token,
        tenant_id: query.tenant_id,
    };

    Ok(Json(use_case.list(input).await?))
}

/// GET /api/core/users/{user_id}
pub async fn get_user<T>(
    State(state): State<GatewayAppState<T>>,
    WithRejection(Path(user_id), _): WithRejection<Path<String>, AppError>,
) -> GatewayResult<Json<Value>>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = UsersUseCase::new(state.client());
    Ok(Json(use_case.get(&user_id).await?))
}

/// POST /api/core/users/create
pub async fn create_user<T>(
    State(state): State<GatewayAppState<T>>,
    LenientJson(req): LenientJson<CreateUserRequest>,
) -> GatewayResult<impl IntoResponse>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = UsersUseCase::new(state.client());

    let input = CreateUserInput {
        email: req.email,
        password: req.password,
        tenant_id: req.tenant_id,
    };

    let created = use_case.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/core/users/{user_id}
pub async fn delete_user<T>(
    State(state): State<GatewayAppState<T>>,
    WithRejection(Path(user_id), _): WithRejection<Path<String>, AppError>,
) -> GatewayResult<Json<Value>>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = UsersUseCase::new(state.client());
    Ok(Json(use_case.delete(&user_id).await?))
}

// ============================================================================
// Health
// ============================================================================

/// GET /api/core/health
pub async fn health<T>(State(state): State<GatewayAppState<T>>) -> Response
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let report = HealthUseCase::new(state.client()).check().await;

    if report.up {
        return Json(HealthResponse {
            status: "up",
            latency_ms: report.latency_ms,
        })
        .into_response();
    }

    AppError::service_unavailable(report.error.unwrap_or_else(|| "Core unreachable".to_string()))
        .with_field("status", "down")
        .with_field("latencyMs", report.latency_ms)
        .into_response()
}

// ============================================================================
// Catch-all
// ============================================================================

/// GET|POST|PUT|PATCH|DELETE /api/core/{*path}
pub async fn forward<T>(
    State(state): State<GatewayAppState<T>>,
    method: Method,
    WithRejection(Path(path), _): WithRejection<Path<String>, AppError>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResult<Response>
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let use_case = ForwardUseCase::new(state.client());

    let input = ForwardInput {
        method,
        path,
        query,
        headers,
        body,
    };

    let proxied = use_case.execute(input).await?;

    let mut response = Response::new(Body::from(proxied.body));
    *response.status_mut() = proxied.status;
    *response.headers_mut() = proxied.headers;
    Ok(response)
}
