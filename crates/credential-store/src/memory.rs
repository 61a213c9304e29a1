//! In-memory credential storage.

use crate::{CredentialStore, StoreResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory storage backend.
///
/// Nothing survives the process; used by tests and by sessions that opt
/// out of credential persistence.
#[derive(Default)]
pub struct MemoryCredentialStore {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut data = self.data.lock().unwrap();
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let data = self.data.lock().unwrap();
        Ok(data.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut data = self.data.lock().unwrap();
        Ok(data.remove(key).is_some())
    }
}
