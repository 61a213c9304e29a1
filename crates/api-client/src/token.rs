//! Credential source for authenticated requests.

/// Supplies the current session credential to the HTTP client.
///
/// Implemented by the session layer; reading per request means a login
/// or logout takes effect on the very next call.
pub trait TokenSource: Send + Sync {
    /// The current opaque token, if a session is active.
    fn token(&self) -> Option<String>;
}

/// A fixed token, useful in tests.
pub struct StaticToken(pub Option<String>);

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
