//! JSON File Repository Implementation

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use platform::crypto::{random_bytes, to_base64_url};
use tokio::fs;

use crate::domain::admin_record::{AdminRecord, StoredAdminRecord};
use crate::domain::repository::CredentialRepository;
use crate::error::{AdminError, AdminResult};

/// File-backed admin credential repository
///
/// Writes go to a uniquely named sibling file which is then renamed over the
/// record, so readers only ever observe a complete document.
#[derive(Debug, Clone)]
pub struct FileCredentialRepository {
    path: PathBuf,
}

impl FileCredentialRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("admin.json");
        let suffix = to_base64_url(&random_bytes(9));
        self.path
            .with_file_name(format!(".{file_name}.{suffix}.tmp"))
    }
}

impl CredentialRepository for FileCredentialRepository {
    async fn load(&self) -> AdminResult<Option<AdminRecord>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AdminError::Storage(e)),
        };

        let stored: StoredAdminRecord = serde_json::from_slice(&raw)
            .map_err(|e| AdminError::CorruptRecord(e.to_string()))?;

        AdminRecord::try_from(stored).map(Some)
    }

    async fn save(&self, record: &AdminRecord) -> AdminResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }

        let mut json = serde_json::to_vec_pretty(&record.to_stored())
            .map_err(|e| AdminError::Internal(e.to_string()))?;
        json.push(b'\n');

        let temp = self.temp_path();
        if let Err(e) = fs::write(&temp, &json).await {
            let _ = fs::remove_file(&temp).await;
            return Err(AdminError::Storage(e));
        }
        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(AdminError::Storage(e));
        }

        tracing::debug!(path = %self.path.display(), "Admin record saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{HASH_LEN, PasswordDigest};

    fn record(username: &str) -> AdminRecord {
        let digest = PasswordDigest::from_parts(vec![1; 16], vec![2; HASH_LEN]).unwrap();
        AdminRecord::new(username, digest)
    }

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCredentialRepository::new(dir.path().join("admin.json"));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCredentialRepository::new(dir.path().join("nested/data/admin.json"));

        repo.save(&record("admin")).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, record("admin"));

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["username"], "admin");
        assert!(json["salt"].is_string());
        assert!(json["passwordHash"].is_string());
    }

    #[tokio::test]
    async fn test_save_replaces_without_leaving_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCredentialRepository::new(dir.path().join("admin.json"));

        repo.save(&record("first")).await.unwrap();
        repo.save(&record("second")).await.unwrap();

        assert_eq!(repo.load().await.unwrap().unwrap().username, "second");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_garbage_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let repo = FileCredentialRepository::new(path);
        assert!(matches!(repo.load().await, Err(AdminError::CorruptRecord(_))));
    }

    #[tokio::test]
    async fn test_concurrent_saves_leave_a_valid_record() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCredentialRepository::new(dir.path().join("admin.json"));

        let a = repo.clone();
        let b = repo.clone();
        let (record_a, record_b) = (record("a"), record("b"));
        let (ra, rb) = tokio::join!(a.save(&record_a), b.save(&record_b));
        ra.unwrap();
        rb.unwrap();

        let name = repo.load().await.unwrap().unwrap().username;
        assert!(name == "a" || name == "b");
    }
}
