//! Dashboard Routes

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{any, get, post},
};
use kernel::error::app_error::{AppError, AppResult};
use platform::crypto::constant_time_eq;
use platform::extract::LenientJson;
use serde_json::{Value, json};

use crate::config::DashboardConfig;
use crate::sms::{HttpSmsDelivery, OutboundSms, SmsDelivery, SmsRequest, compose_message, dispatch};

/// Header carrying the dashboard API key on plugin routes
pub const API_KEY_HEADER: &str = "api-key";

/// Shared state for dashboard handlers
pub struct DashboardState<D> {
    pub config: Arc<DashboardConfig>,
    pub delivery: Arc<D>,
}

impl<D> Clone for DashboardState<D> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            delivery: self.delivery.clone(),
        }
    }
}

impl<D> DashboardState<D> {
    pub fn new(config: DashboardConfig, delivery: D) -> Self {
        Self {
            config: Arc::new(config),
            delivery: Arc::new(delivery),
        }
    }
}

/// Create the dashboard router
pub fn dashboard_router(state: DashboardState<HttpSmsDelivery>) -> Router {
    dashboard_router_generic(state)
}

/// Create a dashboard router for any delivery implementation
pub fn dashboard_router_generic<D>(state: DashboardState<D>) -> Router
where
    D: SmsDelivery + Sync + 'static,
{
    Router::new()
        .route("/dashboard", any(redirect_dashboard))
        .route("/dashboard/", any(redirect_dashboard))
        .route("/dashboard/{*rest}", any(redirect_dashboard))
        .route("/auth/plugin/sms/send", post(send_sms::<D>))
        .route("/health", get(health))
        .with_state(state)
}

/// `/dashboard[/*]` → `/auth/dashboard[/*]`
async fn redirect_dashboard(uri: Uri) -> Response {
    let rest = uri.path().strip_prefix("/dashboard").unwrap_or_default();
    (
        StatusCode::FOUND,
        [(header::LOCATION, format!("/auth/dashboard{rest}"))],
    )
        .into_response()
}

/// POST /auth/plugin/sms/send
async fn send_sms<D>(
    State(state): State<DashboardState<D>>,
    headers: HeaderMap,
    LenientJson(req): LenientJson<SmsRequest>,
) -> AppResult<(StatusCode, Json<Value>)>
where
    D: SmsDelivery + Sync + 'static,
{
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !constant_time_eq(presented.as_bytes(), state.config.api_key.as_bytes()) {
        tracing::warn!("SMS plugin call with a missing or wrong api-key");
        return Err(AppError::unauthorized("Unauthorized"));
    }

    let phone = req
        .phone_number
        .clone()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("phoneNumber is required"))?;
    let message = compose_message(&req)
        .ok_or_else(|| AppError::bad_request("userInputCode or urlWithLinkCode is required"))?;

    tracing::info!(
        tenant_id = req.tenant_id.as_deref().unwrap_or("public"),
        "Dispatching passwordless SMS"
    );

    dispatch(
        state.delivery.clone(),
        OutboundSms {
            phone,
            message,
            sender: state.config.sms.sender.clone(),
        },
    );

    Ok((StatusCode::ACCEPTED, Json(json!({ "ok": true }))))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    struct ChannelDelivery {
        tx: mpsc::UnboundedSender<OutboundSms>,
    }

    impl SmsDelivery for ChannelDelivery {
        async fn deliver(&self, sms: OutboundSms) {
            let _ = self.tx.send(sms);
        }
    }

    fn app() -> (Router, mpsc::UnboundedReceiver<OutboundSms>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = DashboardState::new(DashboardConfig::development(), ChannelDelivery { tx });
        (dashboard_router_generic(state), rx)
    }

    async fn send_sms_request(app: Router, api_key: Option<&str>, body: Value) -> Response {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/auth/plugin/sms/send")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(key) = api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }
        app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_redirects() {
        for (from, to) in [
            ("/dashboard", "/auth/dashboard"),
            ("/dashboard/", "/auth/dashboard/"),
            ("/dashboard/users/42?tab=info", "/auth/dashboard/users/42"),
        ] {
            let (app, _rx) = app();
            let res = app
                .oneshot(Request::builder().uri(from).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::FOUND, "{from}");
            assert_eq!(res.headers()[header::LOCATION], to);
        }
    }

    #[tokio::test]
    async fn test_similar_prefix_not_redirected() {
        let (app, _rx) = app();
        let res = app
            .oneshot(Request::builder().uri("/dashboards").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _rx) = app();
        let res = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_sms_requires_api_key() {
        let body = json!({ "phoneNumber": "+15550100", "userInputCode": "123456" });

        for key in [None, Some("wrong")] {
            let (app, mut rx) = app();
            let res = send_sms_request(app, key, body.clone()).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(json_body(res).await, json!({ "error": "Unauthorized" }));
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_sms_requires_code_or_link() {
        let (app, _rx) = app();
        let res = send_sms_request(app, Some("change-me-dashboard"), json!({ "phoneNumber": "+15550100" })).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let (app, _rx) = self::app();
        let res = send_sms_request(app, Some("change-me-dashboard"), json!({ "userInputCode": "1" })).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await, json!({ "error": "phoneNumber is required" }));
    }

    #[tokio::test]
    async fn test_sms_accepted_and_delivered() {
        let (app, mut rx) = app();
        let res = send_sms_request(
            app,
            Some("change-me-dashboard"),
            json!({ "phoneNumber": "+15550100", "userInputCode": "123456", "codeLifetime": 120000 }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(json_body(res).await, json!({ "ok": true }));

        let sms = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            sms,
            OutboundSms {
                phone: "+15550100".to_string(),
                message: "Your verification code is 123456. It expires in 2 minutes.".to_string(),
                sender: "SuperTokens".to_string(),
            }
        );
    }
}
