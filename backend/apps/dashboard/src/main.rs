//! Dashboard Server Entry Point
//!
//! Standalone server for the Core's hosted dashboard: passwordless SMS
//! delivery hook and the legacy `/dashboard` redirect.

mod config;
mod routes;
mod sms;

use std::net::SocketAddr;

use axum::http::{self, HeaderName, Method, header};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DashboardConfig;
use crate::routes::{DashboardState, dashboard_router};
use crate::sms::HttpSmsDelivery;

/// Headers the hosted dashboard sends besides `content-type`
const CORE_CORS_HEADERS: [&str; 5] = ["rid", "fdi-version", "anti-csrf", "st-auth-mode", "api-key"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env.local if present, then .env
    dotenvy::from_filename(".env.local")
        .or_else(|_| dotenvy::dotenv())
        .ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let origin: http::HeaderValue = config.origin().parse()?;
    let mut allowed_headers = vec![header::CONTENT_TYPE, header::AUTHORIZATION];
    allowed_headers.extend(CORE_CORS_HEADERS.map(HeaderName::from_static));

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list(allowed_headers))
        .allow_credentials(true);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let delivery = HttpSmsDelivery::new(config.sms.clone());
    let app = dashboard_router(DashboardState::new(config, delivery))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = TcpListener::bind(addr).await.map_err(|e| {
        anyhow::anyhow!(
            "Port {} unavailable ({e}); set DASHBOARD_PORT to a free port",
            addr.port()
        )
    })?;

    tracing::info!("Dashboard redirect at http://localhost:{}/dashboard", addr.port());
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
