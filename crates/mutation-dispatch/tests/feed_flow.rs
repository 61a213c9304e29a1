//! End-to-end coordination tests over an in-memory backend: login,
//! identity resolution, cached reads, and mutation-driven invalidation.

use api_client::{ApiError, ApiResult, NewAccount, Post, User};
use async_trait::async_trait;
use chrono::Utc;
use credential_store::MemoryCredentialStore;
use feed_cache::{FeedCache, PostsApi, Scope};
use mutation_dispatch::{MutationCoordinator, MutationKind, MutationState, Notifier};
use session_engine::{AuthBackend, AuthState, SessionManager, TokenCell};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the remote service.
struct FakeServer {
    user: User,
    posts: Mutex<Vec<Post>>,
    feed_fetches: AtomicUsize,
    profile_fetches: AtomicUsize,
}

impl FakeServer {
    fn new() -> Self {
        Self {
            user: User {
                id: "u1".to_string(),
                name: "Dina".to_string(),
                email: Some("dina@example.com".to_string()),
                photo: None,
            },
            posts: Mutex::new(Vec::new()),
            feed_fetches: AtomicUsize::new(0),
            profile_fetches: AtomicUsize::new(0),
        }
    }

    /// Server-side post insertion, as the create-post endpoint would do.
    fn insert_post(&self, body: &str) -> ApiResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let id = format!("p{}", posts.len() + 1);
        posts.push(Post {
            id,
            body: body.to_string(),
            image: None,
            user: self.user.clone(),
            created_at: Utc::now(),
            comments: Vec::new(),
        });
        Ok(())
    }
}

#[async_trait]
impl AuthBackend for FakeServer {
    async fn sign_up(&self, _account: &NewAccount) -> ApiResult<()> {
        Ok(())
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> ApiResult<String> {
        Ok("fake-token".to_string())
    }

    async fn fetch_profile(&self) -> ApiResult<User> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.user.clone())
    }
}

#[async_trait]
impl PostsApi for FakeServer {
    async fn posts(&self, limit: u32) -> ApiResult<Vec<Post>> {
        self.feed_fetches.fetch_add(1, Ordering::SeqCst);
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().take(limit as usize).cloned().collect())
    }

    async fn user_posts(&self, user_id: &str) -> ApiResult<Vec<Post>> {
        let posts = self.posts.lock().unwrap();
        Ok(posts
            .iter()
            .filter(|p| p.user.id == user_id)
            .cloned()
            .collect())
    }

    async fn post(&self, post_id: &str) -> ApiResult<Post> {
        let posts = self.posts.lock().unwrap();
        posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
            .ok_or(ApiError::Remote {
                status: 404,
                message: Some("post not found".to_string()),
            })
    }
}

/// Notifier that records what the user would have seen.
#[derive(Default)]
struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

struct Harness {
    server: Arc<FakeServer>,
    session: Arc<SessionManager>,
    feed: Arc<FeedCache>,
    notifier: Arc<RecordingNotifier>,
    coordinator: MutationCoordinator,
}

fn harness() -> Harness {
    let server = Arc::new(FakeServer::new());
    let store = Arc::new(MemoryCredentialStore::new());
    let session = Arc::new(
        SessionManager::new(server.clone(), store, TokenCell::new()).unwrap(),
    );
    let feed = Arc::new(FeedCache::new(server.clone()));
    let notifier = Arc::new(RecordingNotifier::default());
    let coordinator =
        MutationCoordinator::new(feed.clone(), session.clone(), notifier.clone());

    Harness {
        server,
        session,
        feed,
        notifier,
        coordinator,
    }
}

#[tokio::test]
async fn test_login_create_post_and_refetch_feed() {
    let h = harness();

    h.session.login("dina@example.com", "pw").await.unwrap();
    let me = h.session.current_identity().await.unwrap();
    assert_eq!(me.id, "u1");
    assert_eq!(h.session.state(), AuthState::Authenticated);

    assert!(h.feed.posts().await.unwrap().is_empty());
    assert_eq!(h.server.feed_fetches.load(Ordering::SeqCst), 1);

    let op = {
        let server = h.server.clone();
        async move { server.insert_post("hello") }
    };
    h.coordinator
        .run(MutationKind::CreatePost, op)
        .await
        .unwrap();

    // The feed scope went stale, so the next read re-fetches and sees
    // the new post.
    assert!(!h.feed.is_fresh(&Scope::Feed));
    let posts = h.feed.posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].body, "hello");
    assert_eq!(h.server.feed_fetches.load(Ordering::SeqCst), 2);

    assert_eq!(h.notifier.successes(), vec!["Post created successfully"]);
    assert!(h.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_comment_mutation_invalidates_all_post_views() {
    let h = harness();
    h.session.login("dina@example.com", "pw").await.unwrap();
    h.server.insert_post("first").unwrap();

    h.feed.posts().await.unwrap();
    h.feed.user_posts("u1").await.unwrap();
    h.feed.post("p1").await.unwrap();

    let op = async move { Ok(()) };
    h.coordinator
        .run(MutationKind::CreateComment, op)
        .await
        .unwrap();

    assert!(!h.feed.is_fresh(&Scope::Feed));
    assert!(!h.feed.is_fresh(&Scope::UserPosts("u1".to_string())));
    assert!(!h.feed.is_fresh(&Scope::Post("p1".to_string())));
    assert_eq!(h.notifier.successes(), vec!["Comment created successfully"]);
}

#[tokio::test]
async fn test_failed_mutation_surfaces_server_message_and_invalidates_nothing() {
    let h = harness();
    h.session.login("dina@example.com", "pw").await.unwrap();
    h.server.insert_post("first").unwrap();
    h.feed.posts().await.unwrap();

    let op = async move {
        Err::<(), _>(ApiError::Remote {
            status: 403,
            message: Some("not allowed to delete this post".to_string()),
        })
    };
    let err = h
        .coordinator
        .run(MutationKind::DeletePost, op)
        .await
        .unwrap_err();
    assert!(matches!(err, mutation_dispatch::MutationError::Api(_)));

    assert_eq!(
        h.notifier.errors(),
        vec!["not allowed to delete this post"]
    );
    assert!(h.notifier.successes().is_empty());
    // Failure invalidates nothing.
    assert!(h.feed.is_fresh(&Scope::Feed));
}

#[tokio::test]
async fn test_failed_mutation_without_server_message_uses_fallback() {
    let h = harness();

    let op = async move {
        Err::<(), _>(ApiError::Remote {
            status: 500,
            message: None,
        })
    };
    h.coordinator
        .run(MutationKind::UpdateComment, op)
        .await
        .unwrap_err();

    assert_eq!(h.notifier.errors(), vec!["Failed to update comment"]);
}

#[tokio::test]
async fn test_mutation_states_are_observable() {
    let h = harness();

    let (release, gate) = tokio::sync::oneshot::channel::<()>();
    let handle = h.coordinator.submit(MutationKind::DeleteComment, async move {
        let _ = gate.await;
        Ok(())
    });

    assert_eq!(handle.state(), MutationState::Pending);
    assert_eq!(handle.kind(), MutationKind::DeleteComment);

    let watcher = handle.subscribe();
    release.send(()).unwrap();
    handle.wait().await.unwrap();

    assert_eq!(*watcher.borrow(), MutationState::Succeeded);
}

#[tokio::test]
async fn test_photo_update_forces_identity_refetch() {
    let h = harness();
    h.session.login("dina@example.com", "pw").await.unwrap();
    h.session.current_identity().await.unwrap();
    assert_eq!(h.server.profile_fetches.load(Ordering::SeqCst), 1);

    let op = async move { Ok(()) };
    h.coordinator
        .run(MutationKind::UpdatePhoto, op)
        .await
        .unwrap();

    assert_eq!(h.session.state(), AuthState::Resolving);
    h.session.current_identity().await.unwrap();
    assert_eq!(h.server.profile_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_password_change_invalidates_nothing() {
    let h = harness();
    h.session.login("dina@example.com", "pw").await.unwrap();
    h.session.current_identity().await.unwrap();
    h.server.insert_post("first").unwrap();
    h.feed.posts().await.unwrap();

    let op = async move { Ok(()) };
    h.coordinator
        .run(MutationKind::ChangePassword, op)
        .await
        .unwrap();

    assert!(h.feed.is_fresh(&Scope::Feed));
    assert_eq!(h.session.state(), AuthState::Authenticated);
    assert_eq!(h.notifier.successes(), vec!["Password changed successfully"]);
}
