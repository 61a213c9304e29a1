//! The mutation coordinator.

use crate::kind::{InvalidationTarget, MutationKind};
use crate::notify::Notifier;
use api_client::{ApiError, ApiResult};
use feed_cache::FeedCache;
use session_engine::SessionManager;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Observable lifecycle of one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    /// The remote call is in flight.
    Pending,
    /// The call succeeded and invalidations were applied.
    Succeeded,
    /// The call failed; nothing was invalidated.
    Failed,
}

/// Error returned when waiting on a mutation.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The mutation task went away without completing.
    #[error("mutation was aborted")]
    Aborted,
}

/// Handle to one submitted mutation.
///
/// The state channel can be watched while the call is in flight;
/// [`MutationHandle::wait`] consumes the handle and yields the result.
pub struct MutationHandle<T> {
    id: Uuid,
    kind: MutationKind,
    state: watch::Receiver<MutationState>,
    task: JoinHandle<Result<T, MutationError>>,
}

impl<T> MutationHandle<T> {
    /// Client-assigned identifier of this mutation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// What kind of write this is.
    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    /// The state as of now.
    pub fn state(&self) -> MutationState {
        *self.state.borrow()
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.clone()
    }

    /// Wait for the mutation to finish.
    pub async fn wait(self) -> Result<T, MutationError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Mutation task failed");
                Err(MutationError::Aborted)
            }
        }
    }
}

/// Runs remote writes with uniform invalidation and notification.
///
/// Mutations are independent of each other; submitting does not wait
/// for earlier submissions.
pub struct MutationCoordinator {
    feed: Arc<FeedCache>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn Notifier>,
}

impl MutationCoordinator {
    /// Create a coordinator over the caches it invalidates and the
    /// notifier it reports through.
    pub fn new(
        feed: Arc<FeedCache>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            feed,
            session,
            notifier,
        }
    }

    /// Submit a mutation. Returns immediately with a handle; the remote
    /// call runs as its own task.
    ///
    /// On success the kind's invalidation table is applied and a
    /// success notification is emitted. On failure an error
    /// notification carries the server's message when present, else the
    /// kind's fallback. No retry either way.
    pub fn submit<T, Fut>(&self, kind: MutationKind, op: Fut) -> MutationHandle<T>
    where
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = watch::channel(MutationState::Pending);
        let id = Uuid::new_v4();
        let feed = self.feed.clone();
        let session = self.session.clone();
        let notifier = self.notifier.clone();

        let task = tokio::spawn(async move {
            tracing::debug!(mutation_id = %id, kind = ?kind, "Mutation started");
            match op.await {
                Ok(value) => {
                    for target in kind.invalidates() {
                        match target {
                            InvalidationTarget::PostViews => feed.invalidate_posts(),
                            InvalidationTarget::Identity => session.invalidate_identity(),
                        }
                    }
                    notifier.success(kind.success_message());
                    tracing::debug!(mutation_id = %id, "Mutation succeeded");
                    let _ = tx.send(MutationState::Succeeded);
                    Ok(value)
                }
                Err(e) => {
                    let message = e
                        .server_message()
                        .unwrap_or_else(|| kind.fallback_error())
                        .to_string();
                    notifier.error(&message);
                    tracing::debug!(mutation_id = %id, error = %e, "Mutation failed");
                    let _ = tx.send(MutationState::Failed);
                    Err(MutationError::Api(e))
                }
            }
        });

        MutationHandle {
            id,
            kind,
            state: rx,
            task,
        }
    }

    /// Submit and wait in one step.
    pub async fn run<T, Fut>(&self, kind: MutationKind, op: Fut) -> Result<T, MutationError>
    where
        Fut: Future<Output = ApiResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.submit(kind, op).wait().await
    }
}
