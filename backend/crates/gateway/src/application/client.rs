//! Core Proxy Client
//!
//! Builds Core URLs, attaches auth headers, enforces the deadline and turns
//! non-2xx answers into [`CoreError`].

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, Method, header};
use serde_json::Value;

use crate::application::config::CoreConfig;
use crate::domain::core_error::CoreError;
use crate::domain::proxy::{ProxyRequest, ProxyResponse};
use crate::domain::transport::CoreTransport;

pub const API_KEY_HEADER: &str = "api-key";
pub const CDI_VERSION_HEADER: &str = "cdi-version";

/// Options for a single Core call
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    /// Query parameters; `None` values are skipped
    pub query: Vec<(String, Option<String>)>,
    /// Overrides the configured deadline
    pub timeout: Option<Duration>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            query: Vec::new(),
            timeout: None,
        }
    }
}

impl CallOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), Some(value.to_string())));
        self
    }

    pub fn query_opt(mut self, key: &str, value: Option<String>) -> Self {
        self.query.push((key.to_string(), value));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Core client
pub struct CoreClient<T>
where
    T: CoreTransport,
{
    transport: Arc<T>,
    config: Arc<CoreConfig>,
}

impl<T> Clone for CoreClient<T>
where
    T: CoreTransport,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T> CoreClient<T>
where
    T: CoreTransport,
{
    pub fn new(transport: Arc<T>, config: Arc<CoreConfig>) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Call the Core and return the parsed JSON body
    ///
    /// `path` is resolved against the Core base URL the way a browser
    /// resolves a link: an absolute path replaces the base path.
    pub async fn call(&self, path: &str, options: CallOptions) -> Result<Value, CoreError> {
        let mut url = self
            .config
            .core_url
            .join(path)
            .map_err(|e| CoreError::InvalidUrl(format!("{path}: {e}")))?;

        let pairs: Vec<(String, String)> = options
            .query
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let mut headers = options.headers;
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.apply_core_headers(&mut headers)?;

        let body = match options.body {
            Some(value) => Some(Bytes::from(
                serde_json::to_vec(&value).map_err(|e| CoreError::Transport(e.to_string()))?,
            )),
            None => None,
        };

        let method = options.method;
        let request = ProxyRequest {
            method: method.clone(),
            url,
            headers,
            body,
            timeout: options.timeout.unwrap_or(self.config.timeout),
        };

        let response = self.send(request).await?;
        let json = response.json();

        tracing::debug!(
            method = %method,
            path = %path,
            status = response.status.as_u16(),
            "Core call completed"
        );

        if !response.status.is_success() {
            return Err(CoreError::from_response(
                response.status.as_u16(),
                &response.text(),
                &json,
            ));
        }

        Ok(json)
    }

    /// Send a prepared request under its deadline
    ///
    /// Any upstream status is returned as a response.
    pub async fn send(&self, request: ProxyRequest) -> Result<ProxyResponse, CoreError> {
        let after = request.timeout;
        match tokio::time::timeout(after, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::Timeout { after }),
        }
    }

    /// Set `api-key` / `cdi-version` when configured
    pub fn apply_core_headers(&self, headers: &mut HeaderMap) -> Result<(), CoreError> {
        if let Some(api_key) = &self.config.api_key {
            headers.insert(API_KEY_HEADER, header_value(API_KEY_HEADER, api_key)?);
        }
        if let Some(cdi_version) = &self.config.cdi_version {
            headers.insert(CDI_VERSION_HEADER, header_value(CDI_VERSION_HEADER, cdi_version)?);
        }
        Ok(())
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, CoreError> {
    HeaderValue::from_str(value)
        .map_err(|_| CoreError::Transport(format!("Configured {name} header value is not valid")))
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
