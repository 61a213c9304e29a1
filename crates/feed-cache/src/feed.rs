//! Cached views over the posts API.

use crate::cache::{FetchError, ScopedCache};
use crate::scope::Scope;
use api_client::{ApiClient, ApiResult, Post, FEED_PAGE_LIMIT};
use async_trait::async_trait;
use std::sync::Arc;

/// The read operations the feed cache wraps.
///
/// [`ApiClient`] is the production implementation; tests substitute a
/// scripted one.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Fetch the global feed, capped at `limit` items.
    async fn posts(&self, limit: u32) -> ApiResult<Vec<Post>>;

    /// Fetch all posts authored by a user.
    async fn user_posts(&self, user_id: &str) -> ApiResult<Vec<Post>>;

    /// Fetch a single post with its comments.
    async fn post(&self, post_id: &str) -> ApiResult<Post>;
}

#[async_trait]
impl PostsApi for ApiClient {
    async fn posts(&self, limit: u32) -> ApiResult<Vec<Post>> {
        ApiClient::posts(self, limit).await
    }

    async fn user_posts(&self, user_id: &str) -> ApiResult<Vec<Post>> {
        ApiClient::user_posts(self, user_id).await
    }

    async fn post(&self, post_id: &str) -> ApiResult<Post> {
        ApiClient::post(self, post_id).await
    }
}

/// Cached post collections, keyed by [`Scope`].
///
/// Post lists and single posts live in separate caches because they
/// cache different value shapes; invalidation spans both, since any
/// post or comment mutation can affect any of them.
pub struct FeedCache {
    api: Arc<dyn PostsApi>,
    lists: ScopedCache<Vec<Post>>,
    singles: ScopedCache<Post>,
}

impl FeedCache {
    /// Create a cache over the given API.
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self {
            api,
            lists: ScopedCache::new(),
            singles: ScopedCache::new(),
        }
    }

    /// The global feed (at most [`FEED_PAGE_LIMIT`] posts).
    pub async fn posts(&self) -> Result<Vec<Post>, FetchError> {
        let api = self.api.clone();
        self.lists
            .get_or_fetch(Scope::Feed, || async move {
                api.posts(FEED_PAGE_LIMIT).await
            })
            .await
    }

    /// Posts authored by `user_id`.
    pub async fn user_posts(&self, user_id: &str) -> Result<Vec<Post>, FetchError> {
        let api = self.api.clone();
        let owner = user_id.to_string();
        self.lists
            .get_or_fetch(Scope::UserPosts(user_id.to_string()), || async move {
                api.user_posts(&owner).await
            })
            .await
    }

    /// A single post with its comments.
    pub async fn post(&self, post_id: &str) -> Result<Post, FetchError> {
        let api = self.api.clone();
        let id = post_id.to_string();
        self.singles
            .get_or_fetch(Scope::Post(post_id.to_string()), || async move {
                api.post(&id).await
            })
            .await
    }

    /// Invalidate every cached post view: the feed, all per-user lists,
    /// and all single posts. Post and comment mutations land here.
    pub fn invalidate_posts(&self) {
        self.lists.invalidate_where(|_| true);
        self.singles.invalidate_where(|_| true);
    }

    /// Whether a scope currently holds a fresh value.
    pub fn is_fresh(&self, scope: &Scope) -> bool {
        match scope {
            Scope::Post(_) => self.singles.is_fresh(scope),
            _ => self.lists.is_fresh(scope),
        }
    }

    /// Drop everything (session teardown).
    pub fn clear(&self) {
        self.lists.clear();
        self.singles.clear();
    }
}
