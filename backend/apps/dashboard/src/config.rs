//! Dashboard Server Configuration

use std::fmt;

use platform::config::{ConfigError, EnvReader, process_env};

pub const DEFAULT_PORT: u16 = 3434;
pub const DEFAULT_API_KEY: &str = "change-me-dashboard";
pub const DEFAULT_SMS_API_URL: &str = "http://sms.bytecraft.ir";
pub const DEFAULT_SMS_SENDER: &str = "SuperTokens";

/// Outbound SMS provider settings
#[derive(Clone)]
pub struct SmsConfig {
    pub api_url: String,
    /// Sent as `Authorization: Bearer <token>` when set
    pub api_token: Option<String>,
    pub sender: String,
}

impl fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("sender", &self.sender)
            .finish()
    }
}

/// Dashboard server configuration
#[derive(Clone)]
pub struct DashboardConfig {
    pub port: u16,
    /// Expected `api-key` header on plugin routes
    pub api_key: String,
    pub sms: SmsConfig,
}

impl fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("port", &self.port)
            .field("api_key", &"[REDACTED]")
            .field("sms", &self.sms)
            .finish()
    }
}

impl DashboardConfig {
    /// Defaults for every setting, no SMS token
    #[cfg(test)]
    pub fn development() -> Self {
        Self::read(&mut EnvReader::new(|_: &str| None))
    }

    pub fn read<F>(env: &mut EnvReader<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = env.parsed("DASHBOARD_PORT", DEFAULT_PORT);
        let api_key = env.or_default("DASHBOARD_API_KEY", DEFAULT_API_KEY);
        let api_url = env
            .optional_url("SMS_API_URL")
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_SMS_API_URL.to_string());
        let api_token = env.first_of(&["SMS_API_TOKEN", "SMS_API_KEY"]);
        let sender = env.or_default("SMS_SENDER", DEFAULT_SMS_SENDER);

        Self {
            port,
            api_key,
            sms: SmsConfig {
                api_url,
                api_token,
                sender,
            },
        }
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env = EnvReader::new(lookup);
        let config = Self::read(&mut env);
        env.finish()?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    /// Browser origin the dashboard is served from
    pub fn origin(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}
