//! Auth state machine.
//!
//! Transitions are a pure function so the lifecycle can be tested
//! without any storage or network machinery behind it.

/// Authentication state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No credential held.
    Anonymous,
    /// Credential held, identity not yet resolved.
    Resolving,
    /// Credential held and identity resolved; identity may be trusted.
    Authenticated,
    /// Credential proven bad by a failed identity resolution.
    Invalid,
}

/// Events that drive the auth state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// Sign-in exchanged credentials for a token.
    LoginSucceeded,
    /// The profile fetch returned the user.
    IdentityResolved,
    /// The profile fetch failed; the credential is not usable.
    IdentityRejected,
    /// The cached identity was invalidated and must re-resolve.
    IdentityInvalidated,
    /// The user logged out, or a bad credential was cleared.
    LoggedOut,
}

/// Apply an event to a state, returning the next state.
///
/// Events that make no sense in the current state leave it unchanged
/// (e.g. a stray `IdentityResolved` while anonymous).
pub fn transition(state: AuthState, event: AuthEvent) -> AuthState {
    use AuthEvent::*;
    use AuthState::*;

    match (state, event) {
        (_, LoginSucceeded) => Resolving,
        (_, LoggedOut) => Anonymous,
        (Resolving, IdentityResolved) => Authenticated,
        (Resolving, IdentityRejected) => Invalid,
        (Authenticated, IdentityInvalidated) => Resolving,
        (state, _) => state,
    }
}
