//! Session error types.

use api_client::{ApiError, ValidationError};
use credential_store::StoreError;
use thiserror::Error;

/// Error type for session operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Input rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server rejected the credentials.
    #[error("{0}")]
    Rejected(String),

    /// A remote call failed for reasons other than bad credentials.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Credential persistence failed.
    #[error("credential storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;
