//! Infrastructure Layer
//!
//! Filesystem persistence for the admin record.

pub mod file;

pub use file::FileCredentialRepository;
