//! Application Configuration
//!
//! Configuration for the Core proxy client.

use std::fmt;
use std::time::Duration;

use platform::config::{ConfigError, ConfigIssue, EnvReader, process_env};
use url::Url;

/// Deadline for a Core call unless the caller overrides it
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Core client configuration
#[derive(Clone)]
pub struct CoreConfig {
    /// Base URL of the Core
    pub core_url: Url,
    /// Sent as `api-key` when set
    pub api_key: Option<String>,
    /// Sent as `cdi-version` when set
    pub cdi_version: Option<String>,
    /// Skip certificate validation for Core calls
    pub insecure_tls: bool,
    /// Default per-call deadline
    pub timeout: Duration,
    /// Application backend settings; read and validated, not used by any route
    pub backend: BackendConfig,
}

/// Application backend settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub api_url: Option<Url>,
    pub signup_path: String,
    pub tenant_header: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            signup_path: "/auth/signup".to_string(),
            tenant_header: "x-supertokens-tenant-id".to_string(),
        }
    }
}

impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("core_url", &self.core_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("cdi_version", &self.cdi_version)
            .field("insecure_tls", &self.insecure_tls)
            .field("timeout", &self.timeout)
            .field("backend", &self.backend)
            .finish()
    }
}

impl CoreConfig {
    pub fn new(core_url: Url) -> Self {
        Self {
            core_url,
            api_key: None,
            cdi_version: None,
            insecure_tls: false,
            timeout: DEFAULT_TIMEOUT,
            backend: BackendConfig::default(),
        }
    }

    /// Read settings, recording problems on the reader
    ///
    /// Returns `None` only when `CORE_URL` is missing or invalid; the issue is
    /// already recorded.
    pub fn read<F>(env: &mut EnvReader<F>) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let core_url = env.required_url("CORE_URL");
        let api_key = env.optional("CORE_API_KEY");
        let cdi_version = env.optional("CORE_CDI_VERSION");
        let insecure_tls = env.flag("CORE_INSECURE_TLS");
        let backend = BackendConfig {
            api_url: env.optional_url("BACKEND_API_URL"),
            signup_path: env.or_default("BACKEND_SIGNUP_PATH", "/auth/signup"),
            tenant_header: env.or_default("BACKEND_TENANT_HEADER", "x-supertokens-tenant-id"),
        };

        Some(Self {
            api_key,
            cdi_version,
            insecure_tls,
            backend,
            ..Self::new(core_url?)
        })
    }

    /// Load from an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env = EnvReader::new(lookup);
        let config = Self::read(&mut env);
        env.finish()?;
        config.ok_or_else(|| {
            ConfigError(vec![ConfigIssue {
                name: "CORE_URL".to_string(),
                reason: "Required".to_string(),
            }])
        })
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_cdi_version(mut self, cdi_version: impl Into<String>) -> Self {
        self.cdi_version = Some(cdi_version.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_minimal_config() {
        let config = CoreConfig::from_lookup(lookup(&[("CORE_URL", "http://core:3567")])).unwrap();

        assert_eq!(config.core_url.as_str(), "http://core:3567/");
        assert_eq!(config.api_key, None);
        assert!(!config.insecure_tls);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.backend, BackendConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = CoreConfig::from_lookup(lookup(&[
            ("CORE_URL", "https://core.example.com/base"),
            ("CORE_API_KEY", "k"),
            ("CORE_CDI_VERSION", "5.0"),
            ("CORE_INSECURE_TLS", "true"),
            ("BACKEND_API_URL", "http://backend:3001"),
            ("BACKEND_SIGNUP_PATH", "/signup"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.cdi_version.as_deref(), Some("5.0"));
        assert!(config.insecure_tls);
        assert_eq!(config.backend.signup_path, "/signup");
        assert_eq!(config.backend.tenant_header, "x-supertokens-tenant-id");
        assert!(config.backend.api_url.is_some());
    }

    #[test]
    fn test_empty_api_key_is_unset() {
        let config = CoreConfig::from_lookup(lookup(&[
            ("CORE_URL", "http://core:3567"),
            ("CORE_API_KEY", ""),
        ]))
        .unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_invalid_values_are_collected() {
        let err = CoreConfig::from_lookup(lookup(&[
            ("CORE_URL", "not a url"),
            ("CORE_INSECURE_TLS", "yes"),
            ("BACKEND_API_URL", "::"),
        ]))
        .unwrap_err();

        assert_eq!(err.0.len(), 3);
        let message = err.to_string();
        assert!(message.starts_with("Invalid environment configuration: "));
        assert!(message.contains("CORE_URL"));
        assert!(message.contains("CORE_INSECURE_TLS"));
        assert!(message.contains("BACKEND_API_URL"));
    }

    #[test]
    fn test_missing_core_url() {
        let err = CoreConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("CORE_URL: Required"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = CoreConfig::new(Url::parse("http://core:3567").unwrap())
            .with_api_key("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
