//! File-backed credential storage.

use crate::{CredentialStore, StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Stores each key as a file under a directory, one value per file.
///
/// Values are trimmed on read so a trailing newline left by manual
/// editing does not corrupt the token.
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Create a store rooted at `dir`. The directory is created lazily
    /// on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> StoreResult<PathBuf> {
        // Keys are fixed constants, but reject separators anyway so a bad
        // key cannot escape the storage directory.
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StoreError::Backend(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(key))
    }

    #[cfg(unix)]
    fn restrict_permissions(path: &Path) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
    }

    #[cfg(not(unix))]
    fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, value)?;
        Self::restrict_permissions(&path)?;
        tracing::debug!(key = %key, "Stored credential value");
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let trimmed = content.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let path = self.key_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(key = %key, "Deleted credential value");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
