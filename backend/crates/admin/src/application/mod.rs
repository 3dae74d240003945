//! Application Layer
//!
//! Credential store, session manager and the use cases built on them.

pub mod check_session;
pub mod config;
pub mod credentials;
pub mod session;
pub mod sign_in;
pub mod update_credentials;

pub use check_session::{CheckSessionUseCase, SessionStatusOutput};
pub use credentials::{CredentialChanges, CredentialStore};
pub use session::SessionManager;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use update_credentials::{
    UpdateCredentialsInput, UpdateCredentialsOutput, UpdateCredentialsUseCase,
};
