//! Session Manager
//!
//! Issues and verifies the admin session cookie.

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use platform::cookie::extract_cookie;

use crate::application::config::AdminConfig;
use crate::domain::admin_record::AdminRecord;
use crate::domain::session_token::{self, SessionClaims, TokenError};
use crate::error::AdminResult;

/// Session manager
#[derive(Clone)]
pub struct SessionManager {
    config: Arc<AdminConfig>,
}

impl SessionManager {
    pub fn new(config: Arc<AdminConfig>) -> Self {
        Self { config }
    }

    /// Mint a token signed with the record's key
    pub fn issue_token_at(&self, record: &AdminRecord, now: DateTime<Utc>) -> AdminResult<String> {
        let claims = SessionClaims::admin(now, self.config.session_ttl_secs());
        Ok(session_token::sign(&claims, &record.signing_key())?)
    }

    /// Set-Cookie value for a fresh session
    pub fn create_session(&self, record: &AdminRecord) -> AdminResult<String> {
        self.create_session_at(record, Utc::now())
    }

    pub fn create_session_at(&self, record: &AdminRecord, now: DateTime<Utc>) -> AdminResult<String> {
        let token = self.issue_token_at(record, now)?;
        Ok(self.config.cookie_config().build_set_cookie(&token))
    }

    /// Set-Cookie value that clears the session
    pub fn destroy_session(&self) -> String {
        self.config.cookie_config().build_delete_cookie()
    }

    /// Session token from request cookies
    pub fn token_from(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.config.session_cookie_name)
    }

    /// Verify a token against the current record
    pub fn verify_token_at(
        &self,
        token: &str,
        record: &AdminRecord,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, TokenError> {
        session_token::verify(token, &record.signing_key(), now)
    }
}
