//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::RenderCache;
use crate::config::SiteConfig;
use crate::services::{ChatClient, EmailService};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Besides the pool and the render cache there
/// is no shared mutable state - handlers are stateless request/response.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    cache: RenderCache,
    chat: Option<ChatClient>,
    email: Option<EmailService>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The chat client and email service are built only when configured;
    /// the corresponding features degrade gracefully when absent.
    #[must_use]
    pub fn new(config: SiteConfig, pool: PgPool) -> Self {
        let chat = config.chat.as_ref().map(ChatClient::new);
        let email = config.email.as_ref().and_then(|email_config| {
            match EmailService::new(email_config) {
                Ok(service) => Some(service),
                Err(e) => {
                    tracing::warn!(error = %e, "email service disabled: SMTP setup failed");
                    None
                }
            }
        });

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                cache: RenderCache::new(),
                chat,
                email,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the render cache.
    #[must_use]
    pub fn cache(&self) -> &RenderCache {
        &self.inner.cache
    }

    /// Get the chat client, if the provider is configured.
    #[must_use]
    pub fn chat(&self) -> Option<&ChatClient> {
        self.inner.chat.as_ref()
    }

    /// Get the email service, if SMTP is configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }
}
