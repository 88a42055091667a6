//! File-backed token store.
//!
//! Tokens are kept as a small JSON object (`{"access": ..., "refresh": ...}`)
//! in the application data directory so a session survives restarts. Reads
//! are served from memory; every write rewrites the file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use fundportal_auth::{TokenKey, TokenStore, TokenStoreError};

#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileTokenStore {
    /// Open the store at `path`, loading whatever was persisted.
    ///
    /// A missing file is an empty store. An unreadable one is discarded: the
    /// session it held is lost and the user logs in again.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "discarding unreadable session file");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn values(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(values)
            .map_err(|e| TokenStoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: TokenKey) -> Option<String> {
        self.values().get(key.as_str()).cloned()
    }

    fn set(&self, key: TokenKey, value: &str) -> Result<(), TokenStoreError> {
        let mut values = self.values();
        let mut next = values.clone();
        next.insert(key.as_str().to_string(), value.to_string());
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.values().clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileTokenStore::open(&path).unwrap();
        store.set(TokenKey::Access, "a1").unwrap();
        store.set(TokenKey::Refresh, "r1").unwrap();

        let reopened = FileTokenStore::open(&path).unwrap();
        assert_eq!(reopened.get(TokenKey::Access).as_deref(), Some("a1"));
        assert_eq!(reopened.get(TokenKey::Refresh).as_deref(), Some("r1"));

        let raw = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["access"], "a1");
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(&path).unwrap();
        store.set(TokenKey::Access, "a1").unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.get(TokenKey::Access), None);
        store.clear().unwrap();
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("fundportal");
        let store = FileTokenStore::open(parent.join("session.json")).unwrap();
        store.set(TokenKey::Access, "a1").unwrap();

        // the data directory turns into a plain file: writes can no longer land
        fs::remove_dir_all(&parent).unwrap();
        fs::write(&parent, "").unwrap();

        assert!(store.set(TokenKey::Refresh, "r1").is_err());
        assert_eq!(store.get(TokenKey::Refresh), None);
        assert_eq!(store.get(TokenKey::Access).as_deref(), Some("a1"));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileTokenStore::open(&path).unwrap();
        assert_eq!(store.get(TokenKey::Access), None);
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileTokenStore::open(&path).unwrap();
        store.set(TokenKey::Access, "a1").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
