//! reqwest Transport Implementation

use std::time::Duration;

use crate::application::config::CoreConfig;
use crate::domain::core_error::CoreError;
use crate::domain::proxy::{ProxyRequest, ProxyResponse};
use crate::domain::transport::CoreTransport;

/// reqwest-backed Core transport
///
/// Certificate validation is relaxed only on this client, and only when
/// `CORE_INSECURE_TLS=true`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &CoreConfig) -> Result<Self, CoreError> {
        if config.insecure_tls {
            tracing::warn!(
                core_url = %config.core_url,
                "TLS certificate validation is disabled for Core calls (CORE_INSECURE_TLS=true)"
            );
        }

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()
            .map_err(|e| CoreError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl CoreTransport for ReqwestTransport {
    async fn send(&self, request: ProxyRequest) -> Result<ProxyResponse, CoreError> {
        let timeout = request.timeout;

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(timeout);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| transport_error(e, timeout))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        Ok(ProxyResponse {
            status,
            headers,
            body,
        })
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> CoreError {
    if err.is_timeout() {
        CoreError::Timeout { after: timeout }
    } else {
        CoreError::Transport(err.to_string())
    }
}
