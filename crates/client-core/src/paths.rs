//! File system paths for the client.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Credential filename under the base directory.
const CREDENTIAL_FILE_NAME: &str = "credential";

/// Manages file system paths for the client.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client files (~/.murmur)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.murmur`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".murmur"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.murmur).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.murmur/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the directory holding persisted credentials (~/.murmur/secrets).
    pub fn secrets_dir(&self) -> PathBuf {
        self.base_dir.join("secrets")
    }

    /// Get the credential file path (~/.murmur/secrets/credential).
    pub fn credential_file(&self) -> PathBuf {
        self.secrets_dir().join(CREDENTIAL_FILE_NAME)
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.secrets_dir())?;
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().expect("Failed to determine home directory")
    }
}
