//! Write coordination for the murmur client.
//!
//! Every remote write goes through [`MutationCoordinator`], which gives
//! each mutation:
//! - three observable states (pending, succeeded, failed) on a watch
//!   channel
//! - cache invalidation driven by the declared table in
//!   [`MutationKind::invalidates`], not ad hoc calls at call sites
//! - a user-visible notification on completion, carrying the server's
//!   message on failure when one was provided
//!
//! Mutations are independent: nothing orders two concurrent writes
//! beyond whatever the server itself serializes.

mod coordinator;
mod kind;
mod notify;

pub use coordinator::{MutationCoordinator, MutationError, MutationHandle, MutationState};
pub use kind::{InvalidationTarget, MutationKind};
pub use notify::{LogNotifier, Notifier};
