//! Shared in-memory credential cell.

use api_client::TokenSource;
use std::sync::{Arc, RwLock};

/// Process-wide holder of the current session token.
///
/// The HTTP layer reads it per request through [`TokenSource`]; the
/// session manager writes it on login and logout. Cloning shares the
/// same underlying cell.
#[derive(Clone, Default)]
pub struct TokenCell {
    token: Arc<RwLock<Option<String>>>,
}

impl TokenCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell pre-seeded with a token.
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    /// Replace the held token.
    pub fn set(&self, token: String) {
        *self.token.write().unwrap() = Some(token);
    }

    /// Drop the held token.
    pub fn clear(&self) {
        *self.token.write().unwrap() = None;
    }

    /// Whether a token is currently held.
    pub fn is_set(&self) -> bool {
        self.token.read().unwrap().is_some()
    }
}

impl TokenSource for TokenCell {
    fn token(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_roundtrip() {
        let cell = TokenCell::new();
        assert!(!cell.is_set());
        assert_eq!(cell.token(), None);

        cell.set("tok-1".to_string());
        assert!(cell.is_set());
        assert_eq!(cell.token(), Some("tok-1".to_string()));

        cell.clear();
        assert!(!cell.is_set());
    }

    #[test]
    fn test_clones_share_state() {
        let cell = TokenCell::new();
        let other = cell.clone();

        cell.set("tok-2".to_string());
        assert_eq!(other.token(), Some("tok-2".to_string()));

        other.clear();
        assert!(!cell.is_set());
    }

    #[test]
    fn test_seeded_cell() {
        let cell = TokenCell::with_token(Some("seed".to_string()));
        assert_eq!(cell.token(), Some("seed".to_string()));
    }
}
