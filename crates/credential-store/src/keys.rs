//! Storage key constants.

/// Storage keys used by the client
pub struct StoreKeys;

impl StoreKeys {
    /// Opaque session token issued by the remote API
    pub const CREDENTIAL: &'static str = "credential";
}
