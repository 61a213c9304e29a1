//! Application wiring: one place where the config, stores, caches, and
//! coordinator come together.

use crate::output::{CliNotifier, OutputFormat};
use anyhow::Context;
use api_client::ApiClient;
use client_core::{Config, Paths};
use credential_store::FileCredentialStore;
use feed_cache::FeedCache;
use mutation_dispatch::MutationCoordinator;
use session_engine::{SessionManager, TokenCell};
use std::sync::Arc;

/// Everything a command needs, initialized once at startup and torn
/// down with the process.
pub struct App {
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionManager>,
    pub feed: Arc<FeedCache>,
    pub mutations: MutationCoordinator,
}

impl App {
    /// Build the application context: load config, seed the session
    /// from the persisted credential, and wire the caches and the
    /// mutation coordinator.
    pub fn init(format: OutputFormat) -> anyhow::Result<Self> {
        let paths = Paths::new()?;
        let config = Config::load(&paths).context("Failed to load configuration")?;
        config.api_url().context("Invalid API URL in configuration")?;

        let store = Arc::new(FileCredentialStore::new(paths.secrets_dir()));
        let tokens = TokenCell::new();

        let api = Arc::new(ApiClient::new(
            config.api_url.clone(),
            Arc::new(tokens.clone()),
        ));

        let session = Arc::new(
            SessionManager::new(api.clone(), store, tokens)
                .context("Failed to initialize session")?,
        );

        let feed = Arc::new(FeedCache::new(api.clone()));
        let mutations = MutationCoordinator::new(
            feed.clone(),
            session.clone(),
            Arc::new(CliNotifier::new(format)),
        );

        tracing::debug!(api_url = %config.api_url, "Application context initialized");

        Ok(Self {
            api,
            session,
            feed,
            mutations,
        })
    }
}
