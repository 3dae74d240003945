//! Password Hashing and Verification
//!
//! scrypt-based password handling with:
//! - Per-password random salt (16 bytes)
//! - Fixed work factor (N=16384, r=8, p=1) and 64-byte derived key
//! - Zeroization of clear text
//! - Constant-time comparison
//!
//! The derived key and salt are stored separately (not as a PHC string) so
//! the on-disk admin record stays `{salt, passwordHash}` in base64.

use std::fmt;

use scrypt::{Params, scrypt};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, random_bytes};

// ============================================================================
// Constants
// ============================================================================

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes
pub const HASH_LEN: usize = 64;

/// log2(N) for N = 16384
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Maximum accepted password length (characters)
pub const MAX_PASSWORD_LENGTH: usize = 1024;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty
    #[error("Password cannot be empty")]
    Empty,

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored digest has the wrong shape
    #[error("Invalid password digest: {0}")]
    InvalidDigest(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password for hashing
    ///
    /// Only emptiness and an upper length bound are enforced; the admin
    /// account accepts any password the operator configures.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = raw.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(raw))
    }

    /// Wrap a candidate password for verification without policy checks
    ///
    /// Login attempts must still run the full key derivation, even for
    /// empty input.
    pub fn candidate(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password with a fresh random salt
    pub fn hash(&self) -> Result<PasswordDigest, PasswordHashError> {
        let salt = random_bytes(SALT_LEN);
        let hash = derive_key(self.as_bytes(), &salt)?;
        Ok(PasswordDigest { salt, hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Password Digest (Safe to store)
// ============================================================================

/// Salt and scrypt-derived key of a password
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl PasswordDigest {
    /// Rebuild a digest from stored parts
    pub fn from_parts(salt: Vec<u8>, hash: Vec<u8>) -> Result<Self, PasswordHashError> {
        if salt.is_empty() {
            return Err(PasswordHashError::InvalidDigest("empty salt".to_string()));
        }
        if hash.len() != HASH_LEN {
            return Err(PasswordHashError::InvalidDigest(format!(
                "expected {} byte hash, got {}",
                HASH_LEN,
                hash.len()
            )));
        }
        Ok(Self { salt, hash })
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Verify a password against this digest
    ///
    /// Recomputes scrypt with the stored salt and compares in constant time.
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        let candidate = derive_key(password.as_bytes(), &self.salt)?;
        Ok(constant_time_eq(&candidate, &self.hash))
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("salt_len", &self.salt.len())
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn derive_key(password: &[u8], salt: &[u8]) -> Result<Vec<u8>, PasswordHashError> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, HASH_LEN)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    let mut output = vec![0u8; HASH_LEN];
    scrypt(password, salt, &params, &mut output)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
    Ok(output)
}

// ============================================================================
// Tests
// ============================================================================
