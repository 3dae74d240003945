//! Sign In Use Case
//!
//! Authenticates the admin and creates a session.

use platform::crypto::constant_time_eq;

use crate::application::credentials::CredentialStore;
use crate::application::session::SessionManager;
use crate::domain::repository::CredentialRepository;
use crate::error::{AdminError, AdminResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Set-Cookie value carrying the session token
    pub set_cookie: String,
    pub username: String,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: CredentialRepository,
{
    store: CredentialStore<R>,
    sessions: SessionManager,
}

impl<R> SignInUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(store: CredentialStore<R>, sessions: SessionManager) -> Self {
        Self { store, sessions }
    }

    pub async fn execute(&self, input: SignInInput) -> AdminResult<SignInOutput> {
        let record = self.store.load().await?;

        // Password hash is always computed, even for an unknown username
        let password_ok = self.store.verify_record(&record, input.password).await?;
        let username_ok = constant_time_eq(input.username.as_bytes(), record.username.as_bytes());

        if !(username_ok && password_ok) {
            return Err(AdminError::InvalidCredentials);
        }

        tracing::info!(username = %record.username, "Admin signed in");

        Ok(SignInOutput {
            set_cookie: self.sessions.create_session(&record)?,
            username: record.username,
        })
    }
}
