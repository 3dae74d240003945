//! Check Session Use Case
//!
//! Decides whether a request carries a valid admin session.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};

use crate::application::credentials::CredentialStore;
use crate::application::session::SessionManager;
use crate::domain::admin_record::AdminRecord;
use crate::domain::repository::CredentialRepository;

/// Session status output
pub struct SessionStatusOutput {
    pub authenticated: bool,
    pub username: Option<String>,
}

/// Check session use case
pub struct CheckSessionUseCase<R>
where
    R: CredentialRepository,
{
    store: CredentialStore<R>,
    sessions: SessionManager,
}

impl<R> CheckSessionUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(store: CredentialStore<R>, sessions: SessionManager) -> Self {
        Self { store, sessions }
    }

    /// True only for a well-formed, unexpired admin token signed with the
    /// current record's key
    pub async fn require_admin(&self, headers: &HeaderMap) -> bool {
        self.require_admin_at(headers, Utc::now()).await
    }

    pub async fn require_admin_at(&self, headers: &HeaderMap, now: DateTime<Utc>) -> bool {
        self.authenticated_record(headers, now).await.is_some()
    }

    /// Session status for the session endpoint
    pub async fn status(&self, headers: &HeaderMap) -> SessionStatusOutput {
        match self.authenticated_record(headers, Utc::now()).await {
            Some(record) => SessionStatusOutput {
                authenticated: true,
                username: Some(record.username),
            },
            None => SessionStatusOutput {
                authenticated: false,
                username: None,
            },
        }
    }

    async fn authenticated_record(
        &self,
        headers: &HeaderMap,
        now: DateTime<Utc>,
    ) -> Option<AdminRecord> {
        let token = self.sessions.token_from(headers)?;

        let record = match self.store.load().await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Session check could not load admin record");
                return None;
            }
        };

        match self.sessions.verify_token_at(&token, &record, now) {
            Ok(_) => Some(record),
            Err(e) => {
                tracing::debug!(reason = %e, "Session token rejected");
                None
            }
        }
    }
}
