//! Repository Traits
//!
//! Interfaces for admin record persistence. Implementation is in infrastructure layer.

use crate::domain::admin_record::AdminRecord;
use crate::error::AdminResult;

/// Admin credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Load the persisted record, `None` when nothing has been stored yet
    async fn load(&self) -> AdminResult<Option<AdminRecord>>;

    /// Replace the persisted record
    async fn save(&self, record: &AdminRecord) -> AdminResult<()>;
}
