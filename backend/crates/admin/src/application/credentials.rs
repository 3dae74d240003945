//! Credential Store
//!
//! Loads, bootstraps, verifies and rotates the admin record.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordDigest};

use crate::application::config::AdminConfig;
use crate::domain::admin_record::AdminRecord;
use crate::domain::repository::CredentialRepository;
use crate::error::{AdminError, AdminResult};

/// Requested credential changes; empty strings count as absent
#[derive(Debug, Default, Clone)]
pub struct CredentialChanges {
    pub new_username: Option<String>,
    pub new_password: Option<String>,
}

impl CredentialChanges {
    fn normalized(self) -> Self {
        Self {
            new_username: self.new_username.filter(|v| !v.is_empty()),
            new_password: self.new_password.filter(|v| !v.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.new_username.as_deref().is_none_or(str::is_empty)
            && self.new_password.as_deref().is_none_or(str::is_empty)
    }
}

/// Credential store over a repository
pub struct CredentialStore<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    config: Arc<AdminConfig>,
}

impl<R> Clone for CredentialStore<R>
where
    R: CredentialRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> CredentialStore<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AdminConfig>) -> Self {
        Self { repo, config }
    }

    /// Current record, bootstrapping it from configuration on first use
    ///
    /// Concurrent first calls may both write; the record on disk after the
    /// race is returned.
    pub async fn load(&self) -> AdminResult<AdminRecord> {
        if let Some(record) = self.repo.load().await? {
            return Ok(record);
        }

        let password = ClearTextPassword::new(self.config.default_password.clone())?;
        let digest = hash_password(password).await?;
        let record = AdminRecord::new(self.config.default_username.clone(), digest);
        self.repo.save(&record).await?;

        tracing::info!(username = %record.username, "Admin record bootstrapped from configuration");

        Ok(self.repo.load().await?.unwrap_or(record))
    }

    /// Check a password against the current record
    pub async fn verify(&self, password: String) -> AdminResult<bool> {
        let record = self.load().await?;
        self.verify_record(&record, password).await
    }

    /// Check a password against an already loaded record
    pub async fn verify_record(&self, record: &AdminRecord, password: String) -> AdminResult<bool> {
        verify_password(record.digest.clone(), ClearTextPassword::candidate(password)).await
    }

    /// Apply credential changes
    ///
    /// The caller must already have verified the current password.
    pub async fn update(&self, changes: CredentialChanges) -> AdminResult<AdminRecord> {
        let changes = changes.normalized();
        if changes.is_empty() {
            return Err(AdminError::NoChanges);
        }

        let mut record = self.load().await?;

        if let Some(username) = changes.new_username {
            record.username = username;
        }
        if let Some(password) = changes.new_password {
            let password = ClearTextPassword::new(password)?;
            record.digest = hash_password(password).await?;
        }

        self.repo.save(&record).await?;
        Ok(record)
    }
}

/// scrypt is CPU bound; keep it off the async workers
async fn hash_password(password: ClearTextPassword) -> AdminResult<PasswordDigest> {
    Ok(tokio::task::spawn_blocking(move || password.hash()).await??)
}

async fn verify_password(digest: PasswordDigest, password: ClearTextPassword) -> AdminResult<bool> {
    Ok(tokio::task::spawn_blocking(move || digest.verify(&password)).await??)
}
