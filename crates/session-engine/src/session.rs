//! Session manager: login, logout, and lazy identity resolution.

use crate::backend::AuthBackend;
use crate::cell::TokenCell;
use crate::error::{AuthError, AuthResult};
use crate::machine::{transition, AuthEvent, AuthState};
use api_client::{validation, ApiError, NewAccount, User};
use credential_store::{CredentialStore, StoreKeys};
use std::sync::{Arc, Mutex};

struct Inner {
    state: AuthState,
    identity: Option<User>,
}

/// Owns the session lifecycle: the persisted credential, the in-memory
/// token cell the HTTP layer reads, and the lazily resolved identity.
///
/// Identity is only trusted while the state is `Authenticated`; a failed
/// resolution clears the whole session locally instead of surfacing an
/// error to the reader.
pub struct SessionManager {
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn CredentialStore>,
    tokens: TokenCell,
    inner: Mutex<Inner>,
}

impl SessionManager {
    /// Create a session manager, reading the persisted credential once
    /// to seed the token cell.
    ///
    /// A persisted credential starts the session in `Resolving`; none
    /// starts it in `Anonymous`.
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        store: Arc<dyn CredentialStore>,
        tokens: TokenCell,
    ) -> AuthResult<Self> {
        let state = match store.get(StoreKeys::CREDENTIAL)? {
            Some(token) => {
                tracing::debug!("Found persisted credential, identity pending");
                tokens.set(token);
                AuthState::Resolving
            }
            None => AuthState::Anonymous,
        };

        Ok(Self {
            backend,
            store,
            tokens,
            inner: Mutex::new(Inner {
                state,
                identity: None,
            }),
        })
    }

    /// Current auth state.
    pub fn state(&self) -> AuthState {
        self.inner.lock().unwrap().state
    }

    /// Register a new account. Does not sign in.
    pub async fn sign_up(&self, account: &NewAccount) -> AuthResult<()> {
        validation::validate_signup(account)?;
        self.backend
            .sign_up(account)
            .await
            .map_err(|e| rejection(e, "Signup failed"))?;
        Ok(())
    }

    /// Exchange credentials for a session token.
    ///
    /// On success the token is persisted, the token cell is seeded, and
    /// identity resolution is marked pending. On failure nothing is
    /// mutated.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<()> {
        validation::validate_login(email, password)?;

        let token = self
            .backend
            .sign_in(email, password)
            .await
            .map_err(|e| rejection(e, "Login failed"))?;

        self.store.set(StoreKeys::CREDENTIAL, &token)?;
        self.tokens.set(token);

        let mut inner = self.inner.lock().unwrap();
        inner.state = transition(inner.state, AuthEvent::LoginSucceeded);
        inner.identity = None;
        tracing::info!("Logged in, identity resolution pending");
        Ok(())
    }

    /// Clear the credential and cached identity. Idempotent.
    pub fn logout(&self) {
        self.tokens.clear();
        if let Err(e) = self.store.delete(StoreKeys::CREDENTIAL) {
            tracing::warn!(error = %e, "Failed to delete persisted credential");
        }

        let mut inner = self.inner.lock().unwrap();
        inner.state = transition(inner.state, AuthEvent::LoggedOut);
        inner.identity = None;
        tracing::debug!("Logged out");
    }

    /// The authenticated user, resolved lazily and cached for the
    /// session lifetime.
    ///
    /// Anonymous and invalid sessions answer `None` without touching the
    /// network. A resolution failure (expired or revoked token) clears
    /// the session and also answers `None`.
    pub async fn current_identity(&self) -> Option<User> {
        {
            let inner = self.inner.lock().unwrap();
            match inner.state {
                AuthState::Authenticated => return inner.identity.clone(),
                AuthState::Anonymous | AuthState::Invalid => return None,
                AuthState::Resolving => {}
            }
        }

        match self.backend.fetch_profile().await {
            Ok(user) => {
                let mut inner = self.inner.lock().unwrap();
                // A logout may have raced the fetch; only accept the
                // identity if we are still resolving.
                if inner.state != AuthState::Resolving {
                    return None;
                }
                inner.state = transition(inner.state, AuthEvent::IdentityResolved);
                inner.identity = Some(user.clone());
                tracing::debug!(user_id = %user.id, "Identity resolved");
                Some(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Identity resolution failed, clearing session");
                self.force_logout();
                None
            }
        }
    }

    /// Force the identity to re-resolve on the next read (after login or
    /// a profile mutation).
    pub fn invalidate_identity(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.state = transition(inner.state, AuthEvent::IdentityInvalidated);
        inner.identity = None;
    }

    /// Local recovery from a credential the server no longer accepts.
    fn force_logout(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.state = transition(inner.state, AuthEvent::IdentityRejected);
            inner.identity = None;
        }
        self.logout();
    }
}

/// Map a remote rejection onto `AuthError`, preferring the server's own
/// message over the generic fallback.
fn rejection(err: ApiError, fallback: &str) -> AuthError {
    match err {
        ApiError::Remote { message, .. } => {
            AuthError::Rejected(message.unwrap_or_else(|| fallback.to_string()))
        }
        other => AuthError::Api(other),
    }
}
