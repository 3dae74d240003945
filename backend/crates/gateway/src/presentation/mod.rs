//! Presentation Layer
//!
//! HTTP handlers, DTOs and router for `/api/core`.

pub mod dto;
pub mod handlers;
pub mod router;
