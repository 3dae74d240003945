//! Domain Layer
//!
//! Outbound request/response shapes, the Core error type and the
//! transport seam.

pub mod core_error;
pub mod proxy;
pub mod transport;
