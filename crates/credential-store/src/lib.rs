//! Credential persistence for the murmur client.
//!
//! This crate stores the opaque session token (and any future client
//! secrets) behind a small storage trait:
//! - **[`FileCredentialStore`]**: one file per key under the client's
//!   secrets directory, owner-only permissions on unix
//! - **[`MemoryCredentialStore`]**: in-memory backend for tests and
//!   ephemeral sessions

mod file;
mod keys;
mod memory;
mod traits;

pub use file::FileCredentialStore;
pub use keys::StoreKeys;
pub use memory::MemoryCredentialStore;
pub use traits::CredentialStore;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific storage error
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
