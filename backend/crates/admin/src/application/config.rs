//! Application Configuration
//!
//! Configuration for the Admin application layer.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use platform::config::{ConfigError, EnvReader, process_env};
use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Record file name inside the data directory
pub const RECORD_FILE_NAME: &str = "admin.json";

/// Admin application configuration
#[derive(Clone)]
pub struct AdminConfig {
    /// Username used when no record has been persisted yet
    pub default_username: String,
    /// Password used when no record has been persisted yet
    pub default_password: String,
    /// Directory holding the admin record
    pub data_dir: PathBuf,
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session lifetime (2 hours)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("default_username", &self.default_username)
            .field("default_password", &"[REDACTED]")
            .field("data_dir", &self.data_dir)
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .finish()
    }
}

impl AdminConfig {
    /// Base configuration around bootstrap credentials
    pub fn new(default_username: impl Into<String>, default_password: impl Into<String>) -> Self {
        Self {
            default_username: default_username.into(),
            default_password: default_password.into(),
            data_dir: PathBuf::from("data"),
            session_cookie_name: "admin_session".to_string(),
            session_ttl: Duration::from_secs(2 * 3600), // 2 hours
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
        }
    }

    /// Create config for development (insecure cookie, admin/admin)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::new("admin", "admin")
        }
    }

    /// Read settings, recording problems on the reader
    ///
    /// `APP_ENV=production` forces a Secure cookie; when unset the build
    /// profile decides.
    pub fn read<F>(env: &mut EnvReader<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = env.required("ADMIN_USERNAME");
        let password = env.required("ADMIN_PASSWORD");
        let cookie_secure = match env.optional("APP_ENV") {
            Some(app_env) => app_env == "production",
            None => !cfg!(debug_assertions),
        };

        Self {
            data_dir: PathBuf::from(env.or_default("ADMIN_DATA_DIR", "data")),
            cookie_secure,
            ..Self::new(username, password)
        }
    }

    /// Load from an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env = EnvReader::new(lookup);
        let config = Self::read(&mut env);
        env.finish()?;
        Ok(config)
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Location of the persisted admin record
    pub fn record_path(&self) -> PathBuf {
        self.data_dir.join(RECORD_FILE_NAME)
    }

    /// Session TTL in seconds
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl_secs()),
        }
    }
}
