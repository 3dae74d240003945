//! SMS Delivery
//!
//! Passwordless login codes and magic links are pushed to an HTTP SMS
//! provider. Delivery runs detached from the request; failures are logged
//! and never reach the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::SmsConfig;

/// Code lifetime assumed when the request carries none (5 minutes)
pub const DEFAULT_CODE_LIFETIME_MS: u64 = 300_000;

/// Body of `POST /auth/plugin/sms/send`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    pub phone_number: Option<String>,
    pub user_input_code: Option<String>,
    pub url_with_link_code: Option<String>,
    /// Milliseconds
    pub code_lifetime: Option<u64>,
    pub tenant_id: Option<String>,
}

/// Payload sent to the SMS provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundSms {
    pub phone: String,
    pub message: String,
    pub sender: String,
}

/// Text for a login code or, failing that, a magic link
///
/// `None` when the request carries neither.
pub fn compose_message(request: &SmsRequest) -> Option<String> {
    let non_empty = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);

    if let Some(code) = non_empty(&request.user_input_code) {
        let lifetime = request
            .code_lifetime
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_CODE_LIFETIME_MS);
        let minutes = ((lifetime as f64 / 60_000.0).round() as u64).max(1);
        let plural = if minutes > 1 { "s" } else { "" };
        return Some(format!(
            "Your verification code is {code}. It expires in {minutes} minute{plural}."
        ));
    }

    non_empty(&request.url_with_link_code).map(|url| format!("Open this link to verify: {url}"))
}

#[trait_variant::make(SmsDelivery: Send)]
pub trait LocalSmsDelivery {
    /// Deliver one message; never fails from the caller's point of view
    async fn deliver(&self, sms: OutboundSms);
}

/// Start delivery in the background and return immediately
pub fn dispatch<D>(delivery: Arc<D>, sms: OutboundSms)
where
    D: SmsDelivery + Sync + 'static,
{
    tokio::spawn(async move {
        delivery.deliver(sms).await;
    });
}

/// Provider client: JSON POST with an optional bearer token
#[derive(Debug, Clone)]
pub struct HttpSmsDelivery {
    client: reqwest::Client,
    config: SmsConfig,
}

impl HttpSmsDelivery {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl SmsDelivery for HttpSmsDelivery {
    async fn deliver(&self, sms: OutboundSms) {
        let mut request = self.client.post(&self.config.api_url).json(&sms);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(phone = %sms.phone, "SMS sent");
            }
            Ok(response) => {
                let status = response.status().as_u16();
                let text = response.text().await.unwrap_or_default();
                tracing::error!(phone = %sms.phone, status, body = %text, "SMS send failed");
            }
            Err(e) => {
                tracing::error!(phone = %sms.phone, error = %e, "SMS send error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(code: &str, lifetime: Option<u64>) -> SmsRequest {
        SmsRequest {
            phone_number: Some("+15550100".to_string()),
            user_input_code: Some(code.to_string()),
            code_lifetime: lifetime,
            ..SmsRequest::default()
        }
    }

    #[test]
    fn test_code_message_minutes() {
        assert_eq!(
            compose_message(&code("123456", None)).unwrap(),
            "Your verification code is 123456. It expires in 5 minutes."
        );
        assert_eq!(
            compose_message(&code("1", Some(60_000))).unwrap(),
            "Your verification code is 1. It expires in 1 minute."
        );
        // 1.5 minutes rounds up
        assert_eq!(
            compose_message(&code("1", Some(90_000))).unwrap(),
            "Your verification code is 1. It expires in 2 minutes."
        );
        // Never below one minute
        assert_eq!(
            compose_message(&code("1", Some(1_000))).unwrap(),
            "Your verification code is 1. It expires in 1 minute."
        );
    }

    #[test]
    fn test_zero_lifetime_uses_default() {
        assert!(compose_message(&code("9", Some(0))).unwrap().ends_with("5 minutes."));
    }

    #[test]
    fn test_link_message() {
        let request = SmsRequest {
            url_with_link_code: Some("https://app.test/verify#abc".to_string()),
            user_input_code: Some(String::new()),
            ..SmsRequest::default()
        };
        assert_eq!(
            compose_message(&request).unwrap(),
            "Open this link to verify: https://app.test/verify#abc"
        );
    }

    #[test]
    fn test_nothing_to_send() {
        assert!(compose_message(&SmsRequest::default()).is_none());
    }

    #[test]
    fn test_outbound_payload_shape() {
        let sms = OutboundSms {
            phone: "+15550100".to_string(),
            message: "hi".to_string(),
            sender: "SuperTokens".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&sms).unwrap(),
            serde_json::json!({ "phone": "+15550100", "message": "hi", "sender": "SuperTokens" })
        );
    }
}
