//! Client-side entity caches for the murmur feed.
//!
//! Server collections are mirrored under scope keys ("the feed", "posts
//! by user X", "post Y"). Cached copies are advisory: mutations never
//! patch them in place, they invalidate, and the next read re-fetches.
//! Concurrent reads of one scope share a single in-flight request.

mod cache;
mod feed;
mod scope;

pub use cache::{FetchError, ScopedCache};
pub use feed::{FeedCache, PostsApi};
pub use scope::Scope;
