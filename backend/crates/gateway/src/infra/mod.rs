//! Infrastructure Layer
//!
//! HTTP transport to the Core.

pub mod http;

pub use http::ReqwestTransport;
