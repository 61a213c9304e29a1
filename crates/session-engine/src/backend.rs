//! Auth backend seam.

use api_client::{ApiClient, ApiResult, NewAccount, User};
use async_trait::async_trait;

/// The remote operations the session manager needs.
///
/// [`ApiClient`] is the production implementation; tests substitute a
/// scripted one.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Register a new account.
    async fn sign_up(&self, account: &NewAccount) -> ApiResult<()>;

    /// Exchange credentials for an opaque session token.
    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<String>;

    /// Fetch the profile of the authenticated user.
    async fn fetch_profile(&self) -> ApiResult<User>;
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn sign_up(&self, account: &NewAccount) -> ApiResult<()> {
        ApiClient::sign_up(self, account).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> ApiResult<String> {
        ApiClient::sign_in(self, email, password).await
    }

    async fn fetch_profile(&self) -> ApiResult<User> {
        ApiClient::profile(self).await
    }
}
