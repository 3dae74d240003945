//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64, constant-time comparison)
//! - Password hashing (scrypt with per-password salt)
//! - Cookie management
//! - Environment configuration reading and validation
//! - Lenient JSON body extraction

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod extract;
pub mod password;
