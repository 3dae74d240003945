//! API Server Entry Point
//!
//! Console server: admin session endpoints under `/api/auth` and the
//! admin-gated Core proxy under `/api/core`.
//! Uses `anyhow` for startup errors; handler errors go through
//! `kernel::error::AppError`.

use std::net::SocketAddr;

use admin::{AdminAppState, AdminConfig, FileCredentialRepository, admin_router, require_admin};
use axum::{
    Router,
    http::{self, Method, header},
    middleware,
};
use gateway::domain::transport::CoreTransport;
use gateway::router::core_router_generic;
use gateway::{CoreConfig, GatewayAppState, ReqwestTransport};
use platform::config::{EnvReader, process_env};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,admin=info,gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Configuration: every problem is reported at once, then startup aborts
    let mut env = EnvReader::new(process_env);
    let admin_config = AdminConfig::read(&mut env);
    let core_config = CoreConfig::read(&mut env);
    let bind_addr = env.parsed("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)));
    let frontend_origins = env.or_default("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS);
    env.finish()?;
    let core_config = core_config.ok_or_else(|| anyhow::anyhow!("CORE_URL is required"))?;

    tracing::info!(
        core_url = %core_config.core_url,
        data_dir = %admin_config.data_dir.display(),
        "Configuration loaded"
    );

    let transport = ReqwestTransport::new(&core_config)?;
    let app = build_app(admin_config, core_config, transport)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&frontend_origins));

    // Start server
    tracing::info!("Listening on {}", bind_addr);

    let listener = TcpListener::bind(bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Console routes; everything under `/api/core` requires an admin session
///
/// The gate wraps the whole Core router, so unmatched methods are refused
/// with 401 like any other unauthenticated request.
fn build_app<T>(admin_config: AdminConfig, core_config: CoreConfig, transport: T) -> Router
where
    T: CoreTransport + Clone + Send + Sync + 'static,
{
    let repo = FileCredentialRepository::new(admin_config.record_path());
    let admin_state = AdminAppState::new(repo, admin_config);
    let gateway_state = GatewayAppState::new(transport, core_config);

    let core_routes = core_router_generic(gateway_state).layer(middleware::from_fn_with_state(
        admin_state.clone(),
        require_admin::<FileCredentialRepository>,
    ));

    Router::new()
        .nest("/api/auth", admin_router(admin_state))
        .nest("/api/core", core_routes)
}

fn cors_layer(frontend_origins: &str) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::{Body, Bytes, to_bytes};
    use axum::http::{HeaderMap, Request, StatusCode};
    use gateway::models::{CoreError, ProxyRequest, ProxyResponse};
    use tower::ServiceExt;

    /// Core stand-in that counts calls and answers `{}`
    #[derive(Clone, Default)]
    struct CountingCore {
        calls: Arc<AtomicUsize>,
    }

    impl CountingCore {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CoreTransport for CountingCore {
        async fn send(&self, _request: ProxyRequest) -> Result<ProxyResponse, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ProxyResponse {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: Bytes::from_static(b"{}"),
            })
        }
    }

    fn app(dir: &tempfile::TempDir, core: &CountingCore) -> Router {
        let admin_config = AdminConfig::new("admin", "s3cret").with_data_dir(dir.path());
        let core_config = CoreConfig::new("http://core.test:3567".parse().unwrap());
        build_app(admin_config, core_config, core.clone())
    }

    async fn body_text(res: axum::response::Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_core_routes_require_session() {
        let dir = tempfile::tempdir().unwrap();
        let core = CountingCore::default();

        for (method, uri) in [
            (Method::GET, "/api/core/tenants"),
            (Method::GET, "/api/core/health"),
            (Method::GET, "/api/core/users/u1"),
            (Method::DELETE, "/api/core/users/u1"),
            (Method::POST, "/api/core/users/create"),
            (Method::PATCH, "/api/core/recipe/anything"),
            // No POST handler on this path; still refused before routing
            (Method::POST, "/api/core/tenants"),
        ] {
            let res = app(&dir, &core)
                .oneshot(
                    Request::builder()
                        .method(method.clone())
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body_text(res).await, r#"{"error":"Unauthorized"}"#);
        }

        assert_eq!(core.calls(), 0);
    }

    #[tokio::test]
    async fn test_signed_in_admin_reaches_core() {
        let dir = tempfile::tempdir().unwrap();
        let core = CountingCore::default();
        let app = app(&dir, &core);

        let login = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"username":"admin","password":"s3cret"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(login.status(), StatusCode::OK);
        let set_cookie = login.headers()[header::SET_COOKIE].to_str().unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/api/core/tenants")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(core.calls(), 1);
    }

    #[tokio::test]
    async fn test_auth_routes_are_public() {
        let dir = tempfile::tempdir().unwrap();
        let core = CountingCore::default();

        let res = app(&dir, &core)
            .oneshot(Request::builder().uri("/api/auth/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, r#"{"authenticated":false}"#);
        assert_eq!(core.calls(), 0);
    }
}
