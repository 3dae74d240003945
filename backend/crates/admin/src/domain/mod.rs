//! Domain Layer
//!
//! Admin record, session token format and the persistence seam.

pub mod admin_record;
pub mod repository;
pub mod session_token;
