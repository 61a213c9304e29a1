//! Typed HTTP client for the murmur REST API.

use crate::error::{extract_server_message, ApiError, ApiResult};
use crate::models::{
    ImageUpload, NewAccount, NewPost, Post, PostEnvelope, PostUpdate, PostsEnvelope,
    ProfileEnvelope, SignInResponse, User,
};
use crate::token::TokenSource;
use reqwest::multipart;
use std::sync::Arc;

/// Page size requested for the global feed.
pub const FEED_PAGE_LIMIT: u32 = 50;

/// Header carrying the session credential. The backend expects the raw
/// token under this name rather than an `Authorization` scheme.
const TOKEN_HEADER: &str = "token";

/// REST API client for posts, comments, and account operations.
///
/// One attempt per call: no retry, backoff, or timeout policy beyond
/// what the transport itself imposes.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    /// * `base_url` - The API base URL (e.g., `https://api.murmur.social`)
    /// * `tokens` - Source of the current session credential
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenSource>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http_client: reqwest::Client::new(),
            base_url,
            tokens,
        }
    }

    /// Build the URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The current credential, or `Unauthenticated` if none is set.
    fn require_token(&self) -> ApiResult<String> {
        self.tokens.token().ok_or(ApiError::Unauthenticated)
    }

    /// Normalize a non-success response into `ApiError::Remote`.
    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = extract_server_message(&body);
        tracing::debug!(status = %status, message = ?message, "Request rejected by server");
        Err(ApiError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    // ==========================================
    // Accounts
    // ==========================================

    /// Register a new account. Does not sign in.
    pub async fn sign_up(&self, account: &NewAccount) -> ApiResult<()> {
        let response = self
            .http_client
            .post(self.url("/users/signup"))
            .json(account)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!(email = %account.email, "Account registered");
        Ok(())
    }

    /// Exchange credentials for an opaque session token.
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<String> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .http_client
            .post(self.url("/users/signin"))
            .json(&body)
            .send()
            .await?;

        let signin: SignInResponse = Self::check(response).await?.json().await?;
        tracing::debug!("Sign-in succeeded");
        Ok(signin.token)
    }

    /// Fetch the profile of the authenticated user.
    pub async fn profile(&self) -> ApiResult<User> {
        let token = self.require_token()?;

        let response = self
            .http_client
            .get(self.url("/users/profile-data"))
            .header(TOKEN_HEADER, &token)
            .send()
            .await?;

        let envelope: ProfileEnvelope = Self::check(response).await?.json().await?;
        Ok(envelope.user)
    }

    /// Replace the profile photo of the authenticated user.
    pub async fn upload_photo(&self, photo: ImageUpload) -> ApiResult<()> {
        let token = self.require_token()?;
        let form = multipart::Form::new().part("photo", image_part(photo)?);

        let response = self
            .http_client
            .put(self.url("/users/upload-photo"))
            .header(TOKEN_HEADER, &token)
            .multipart(form)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!("Profile photo updated");
        Ok(())
    }

    /// Change the password of the authenticated user.
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResult<()> {
        let token = self.require_token()?;
        // The backend names the current password just "password".
        let body = serde_json::json!({
            "password": old_password,
            "newPassword": new_password,
        });

        let response = self
            .http_client
            .patch(self.url("/users/change-password"))
            .header(TOKEN_HEADER, &token)
            .json(&body)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    // ==========================================
    // Posts
    // ==========================================

    /// Fetch the global feed, newest first, capped at `limit` items.
    pub async fn posts(&self, limit: u32) -> ApiResult<Vec<Post>> {
        let token = self.require_token()?;
        let url = format!("{}?limit={}", self.url("/posts"), limit);

        tracing::debug!(limit, "Fetching feed");

        let response = self
            .http_client
            .get(&url)
            .header(TOKEN_HEADER, &token)
            .send()
            .await?;

        let envelope: PostsEnvelope = Self::check(response).await?.json().await?;
        tracing::debug!("Fetched {} posts", envelope.posts.len());
        Ok(envelope.posts)
    }

    /// Fetch all posts authored by a user.
    pub async fn user_posts(&self, user_id: &str) -> ApiResult<Vec<Post>> {
        let token = self.require_token()?;

        let response = self
            .http_client
            .get(self.url(&format!("/users/{}/posts", user_id)))
            .header(TOKEN_HEADER, &token)
            .send()
            .await?;

        let envelope: PostsEnvelope = Self::check(response).await?.json().await?;
        Ok(envelope.posts)
    }

    /// Fetch a single post with its comments.
    pub async fn post(&self, post_id: &str) -> ApiResult<Post> {
        let token = self.require_token()?;

        let response = self
            .http_client
            .get(self.url(&format!("/posts/{}", post_id)))
            .header(TOKEN_HEADER, &token)
            .send()
            .await?;

        let envelope: PostEnvelope = Self::check(response).await?.json().await?;
        Ok(envelope.post)
    }

    /// Create a post. Multipart, since an image may ride along.
    pub async fn create_post(&self, post: NewPost) -> ApiResult<()> {
        let token = self.require_token()?;
        let form = post_form(post.body, post.image)?;

        let response = self
            .http_client
            .post(self.url("/posts"))
            .header(TOKEN_HEADER, &token)
            .multipart(form)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!("Post created");
        Ok(())
    }

    /// Update a post's body and optionally its image.
    pub async fn update_post(&self, post_id: &str, update: PostUpdate) -> ApiResult<()> {
        let token = self.require_token()?;
        let form = post_form(update.body, update.image)?;

        let response = self
            .http_client
            .put(self.url(&format!("/posts/{}", post_id)))
            .header(TOKEN_HEADER, &token)
            .multipart(form)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!(post_id = %post_id, "Post updated");
        Ok(())
    }

    /// Delete a post.
    pub async fn delete_post(&self, post_id: &str) -> ApiResult<()> {
        let token = self.require_token()?;

        let response = self
            .http_client
            .delete(self.url(&format!("/posts/{}", post_id)))
            .header(TOKEN_HEADER, &token)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    // ==========================================
    // Comments
    // ==========================================

    /// Create a comment on a post.
    pub async fn create_comment(&self, post_id: &str, content: &str) -> ApiResult<()> {
        let token = self.require_token()?;
        let body = serde_json::json!({
            "content": content,
            "post": post_id,
        });

        let response = self
            .http_client
            .post(self.url("/comments"))
            .header(TOKEN_HEADER, &token)
            .json(&body)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!(post_id = %post_id, "Comment created");
        Ok(())
    }

    /// Update a comment's content.
    pub async fn update_comment(&self, comment_id: &str, content: &str) -> ApiResult<()> {
        let token = self.require_token()?;
        let body = serde_json::json!({ "content": content });

        let response = self
            .http_client
            .put(self.url(&format!("/comments/{}", comment_id)))
            .header(TOKEN_HEADER, &token)
            .json(&body)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!(comment_id = %comment_id, "Comment updated");
        Ok(())
    }

    /// Delete a comment.
    pub async fn delete_comment(&self, comment_id: &str) -> ApiResult<()> {
        let token = self.require_token()?;

        let response = self
            .http_client
            .delete(self.url(&format!("/comments/{}", comment_id)))
            .header(TOKEN_HEADER, &token)
            .send()
            .await?;

        Self::check(response).await?;
        tracing::info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}

/// Build the multipart form shared by post create and update.
fn post_form(body: String, image: Option<ImageUpload>) -> ApiResult<multipart::Form> {
    let mut form = multipart::Form::new().text("body", body);
    if let Some(image) = image {
        form = form.part("image", image_part(image)?);
    }
    Ok(form)
}

/// Turn an in-memory image into a multipart part.
fn image_part(image: ImageUpload) -> ApiResult<multipart::Part> {
    let part = multipart::Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.mime)?;
    Ok(part)
}
