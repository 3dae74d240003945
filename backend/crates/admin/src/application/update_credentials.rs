//! Update Credentials Use Case
//!
//! Rotates the admin username and/or password after re-checking the
//! current password.

use crate::application::credentials::{CredentialChanges, CredentialStore};
use crate::domain::repository::CredentialRepository;
use crate::error::{AdminError, AdminResult};

/// Update credentials input
pub struct UpdateCredentialsInput {
    pub current_password: Option<String>,
    pub new_username: Option<String>,
    pub new_password: Option<String>,
}

/// Update credentials output
pub struct UpdateCredentialsOutput {
    pub username: String,
    /// Sessions signed with the previous key are no longer valid
    pub password_changed: bool,
}

/// Update credentials use case
pub struct UpdateCredentialsUseCase<R>
where
    R: CredentialRepository,
{
    store: CredentialStore<R>,
}

impl<R> UpdateCredentialsUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(store: CredentialStore<R>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, input: UpdateCredentialsInput) -> AdminResult<UpdateCredentialsOutput> {
        let current_password = input
            .current_password
            .filter(|p| !p.is_empty())
            .ok_or(AdminError::MissingField("currentPassword"))?;

        if !self.store.verify(current_password).await? {
            return Err(AdminError::WrongCurrentPassword);
        }

        let changes = CredentialChanges {
            new_username: input.new_username,
            new_password: input.new_password,
        };
        if changes.is_empty() {
            return Err(AdminError::NoChanges);
        }
        let password_changed = changes.new_password.as_deref().is_some_and(|p| !p.is_empty());

        let record = self.store.update(changes).await?;

        tracing::info!(
            username = %record.username,
            password_changed,
            "Admin credentials updated"
        );

        Ok(UpdateCredentialsOutput {
            username: record.username,
            password_changed,
        })
    }
}
