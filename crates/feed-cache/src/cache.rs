//! Scope-keyed cache with single-flight fetching.

use crate::scope::Scope;
use api_client::{ApiError, ApiResult};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::broadcast;

/// Error returned by a cached read.
///
/// The underlying `ApiError` is shared behind an `Arc` because one
/// failed fetch may be delivered to several waiting readers.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The fetch itself failed.
    #[error("{0}")]
    Api(Arc<ApiError>),

    /// The in-flight fetch this read was waiting on went away without
    /// producing a result.
    #[error("shared fetch was interrupted")]
    Interrupted,
}

impl FetchError {
    /// The underlying API error, when there was one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            FetchError::Api(e) => Some(e),
            FetchError::Interrupted => None,
        }
    }
}

struct CacheSlot<T> {
    value: T,
    stale: bool,
}

struct CacheInner<T> {
    slots: HashMap<Scope, CacheSlot<T>>,
    inflight: HashMap<Scope, broadcast::Sender<Result<T, FetchError>>>,
}

/// What a read found when it looked at the cache.
enum ReadPlan<T> {
    /// Wait on someone else's in-flight fetch.
    Follow(broadcast::Receiver<Result<T, FetchError>>),
    /// This read owns the fetch.
    Lead(broadcast::Sender<Result<T, FetchError>>),
}

/// A cache of values keyed by [`Scope`].
///
/// The lock is a plain mutex held only for map bookkeeping, never
/// across an await. At most one fetch per scope is outstanding at any
/// time; late readers subscribe to the leader's result.
pub struct ScopedCache<T> {
    inner: Mutex<CacheInner<T>>,
}

impl<T: Clone> Default for ScopedCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> ScopedCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                slots: HashMap::new(),
                inflight: HashMap::new(),
            }),
        }
    }

    /// Return the cached value for `scope`, fetching it with `fetch`
    /// when the slot is absent or stale.
    ///
    /// Concurrent calls for the same scope issue exactly one fetch; the
    /// rest share its result.
    pub async fn get_or_fetch<F, Fut>(&self, scope: Scope, fetch: F) -> Result<T, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let plan = {
            let mut inner = self.inner.lock().unwrap();

            if let Some(slot) = inner.slots.get(&scope) {
                if !slot.stale {
                    tracing::trace!(scope = %scope, "Cache hit");
                    return Ok(slot.value.clone());
                }
            }

            if let Some(tx) = inner.inflight.get(&scope) {
                tracing::trace!(scope = %scope, "Joining in-flight fetch");
                ReadPlan::Follow(tx.subscribe())
            } else {
                let (tx, _) = broadcast::channel(1);
                inner.inflight.insert(scope.clone(), tx.clone());
                ReadPlan::Lead(tx)
            }
        };

        match plan {
            ReadPlan::Follow(mut rx) => match rx.recv().await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Interrupted),
            },
            ReadPlan::Lead(tx) => {
                tracing::debug!(scope = %scope, "Fetching");
                let result = match fetch().await {
                    Ok(value) => {
                        let mut inner = self.inner.lock().unwrap();
                        inner.inflight.remove(&scope);
                        inner.slots.insert(
                            scope.clone(),
                            CacheSlot {
                                value: value.clone(),
                                stale: false,
                            },
                        );
                        Ok(value)
                    }
                    Err(e) => {
                        let mut inner = self.inner.lock().unwrap();
                        inner.inflight.remove(&scope);
                        Err(FetchError::Api(Arc::new(e)))
                    }
                };
                // Nobody listening is fine.
                let _ = tx.send(result.clone());
                result
            }
        }
    }

    /// Mark one scope stale. The next read re-fetches.
    pub fn invalidate(&self, scope: &Scope) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(slot) = inner.slots.get_mut(scope) {
            slot.stale = true;
            tracing::debug!(scope = %scope, "Invalidated");
        }
    }

    /// Mark every scope matching the predicate stale.
    pub fn invalidate_where(&self, mut pred: impl FnMut(&Scope) -> bool) {
        let mut inner = self.inner.lock().unwrap();
        for (scope, slot) in inner.slots.iter_mut() {
            if pred(scope) {
                slot.stale = true;
                tracing::debug!(scope = %scope, "Invalidated");
            }
        }
    }

    /// Whether a scope currently holds a fresh value.
    pub fn is_fresh(&self, scope: &Scope) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.slots.get(scope).map(|s| !s.stale).unwrap_or(false)
    }

    /// Drop every cached value (session teardown).
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.slots.clear();
    }
}
