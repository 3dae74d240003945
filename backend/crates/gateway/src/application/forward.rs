//! Forward Use Case
//!
//! Passes arbitrary `/api/core/*` requests through to the Core.

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, Method, header};
use url::{Url, form_urlencoded};

use crate::application::client::CoreClient;
use crate::domain::proxy::{ProxyRequest, ProxyResponse};
use crate::domain::transport::CoreTransport;
use crate::error::{GatewayError, GatewayResult};

/// Connection-scoped headers never forwarded in either direction
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forward input
#[derive(Debug)]
pub struct ForwardInput {
    pub method: Method,
    /// Path below `/api/core/`, without the leading slash
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Forward use case
pub struct ForwardUseCase<T>
where
    T: CoreTransport,
{
    client: CoreClient<T>,
}

impl<T> ForwardUseCase<T>
where
    T: CoreTransport,
{
    pub fn new(client: CoreClient<T>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, input: ForwardInput) -> GatewayResult<ProxyResponse> {
        let url = self.target_url(&input.path, input.query.as_deref());

        let mut headers = forwardable_headers(&input.headers);
        if let Some(host) = host_header(&url) {
            headers.insert(header::HOST, host);
        }
        if !headers.contains_key(header::CONTENT_TYPE) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        self.client.apply_core_headers(&mut headers)?;

        let body = match input.method {
            Method::GET | Method::HEAD => None,
            _ => Some(input.body),
        };

        let request = ProxyRequest {
            method: input.method.clone(),
            url,
            headers,
            body,
            timeout: self.client.config().timeout,
        };

        let mut response = self.client.send(request).await.map_err(|e| {
            tracing::warn!(path = %input.path, error = %e, "Core forward failed");
            GatewayError::Upstream(e.to_string())
        })?;

        tracing::debug!(
            method = %input.method,
            path = %input.path,
            status = response.status.as_u16(),
            "Forwarded to Core"
        );

        strip_hop_by_hop(&mut response.headers);
        response.headers.remove(header::CONTENT_LENGTH);
        Ok(response)
    }

    /// Core base URL with `path` appended to its base path and the inbound
    /// query merged over any base query
    fn target_url(&self, path: &str, query: Option<&str>) -> Url {
        let mut url = self.client.config().core_url.clone();

        let base = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base}/{path}"));

        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        if let Some(query) = query {
            for (key, value) in form_urlencoded::parse(query.as_bytes()).into_owned() {
                pairs.retain(|(existing, _)| *existing != key);
                pairs.push((key, value));
            }
        }

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        url
    }
}

/// Inbound headers minus cookies, hop-by-hop headers and framing
fn forwardable_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.remove(header::COOKIE);
    headers.remove(header::CONTENT_LENGTH);
    strip_hop_by_hop(&mut headers);
    headers
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

fn host_header(url: &Url) -> Option<HeaderValue> {
    let host = url.host_str()?;
    let value = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    HeaderValue::from_str(&value).ok()
}
