//! Admin Record Entity
//!
//! The single principal of the console: a username and the scrypt digest of
//! its password.

use platform::crypto::{from_base64, sha256, to_base64};
use platform::password::PasswordDigest;
use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};

/// On-disk format version
pub const RECORD_VERSION: u32 = 1;

/// Domain separation prefix for the session signing key
const SIGNING_KEY_CONTEXT: &[u8] = b"admin-ui:";

/// Admin record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRecord {
    pub username: String,
    pub digest: PasswordDigest,
}

impl AdminRecord {
    pub fn new(username: impl Into<String>, digest: PasswordDigest) -> Self {
        Self {
            username: username.into(),
            digest,
        }
    }

    /// Secret for the HS256 session token
    ///
    /// Derived from the current salt and hash, so rotating the password
    /// invalidates every token issued before the rotation.
    pub fn signing_key(&self) -> [u8; 32] {
        let salt = self.digest.salt();
        let hash = self.digest.hash();

        let mut material = Vec::with_capacity(SIGNING_KEY_CONTEXT.len() + salt.len() + hash.len());
        material.extend_from_slice(SIGNING_KEY_CONTEXT);
        material.extend_from_slice(salt);
        material.extend_from_slice(hash);
        sha256(&material)
    }

    pub fn to_stored(&self) -> StoredAdminRecord {
        StoredAdminRecord {
            version: RECORD_VERSION,
            username: self.username.clone(),
            salt: to_base64(self.digest.salt()),
            password_hash: to_base64(self.digest.hash()),
        }
    }
}

/// Serialized form of [`AdminRecord`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAdminRecord {
    pub version: u32,
    pub username: String,
    pub salt: String,
    pub password_hash: String,
}

impl TryFrom<StoredAdminRecord> for AdminRecord {
    type Error = AdminError;

    fn try_from(stored: StoredAdminRecord) -> AdminResult<Self> {
        if stored.version != RECORD_VERSION {
            return Err(AdminError::CorruptRecord(format!(
                "unsupported version {}",
                stored.version
            )));
        }
        if stored.username.is_empty() {
            return Err(AdminError::CorruptRecord("empty username".to_string()));
        }

        let salt = from_base64(&stored.salt)
            .map_err(|e| AdminError::CorruptRecord(format!("salt: {e}")))?;
        let hash = from_base64(&stored.password_hash)
            .map_err(|e| AdminError::CorruptRecord(format!("passwordHash: {e}")))?;
        let digest = PasswordDigest::from_parts(salt, hash)
            .map_err(|e| AdminError::CorruptRecord(e.to_string()))?;

        Ok(AdminRecord::new(stored.username, digest))
    }
}
