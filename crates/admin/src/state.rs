//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::{ActivityLog, ResponseCache};
use crate::shopify::ShopifyClient;

/// Application state handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    shopify: ShopifyClient,
    cache: ResponseCache,
    activity: ActivityLog,
}

impl AppState {
    /// Assemble the state from its already-constructed parts.
    #[must_use]
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let shopify = ShopifyClient::new(&config.shopify);
        let cache = ResponseCache::new(&config.cache);
        let activity = ActivityLog::new(config.activity_log_capacity);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                shopify,
                cache,
                activity,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn shopify(&self) -> &ShopifyClient {
        &self.inner.shopify
    }

    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.inner.cache
    }

    #[must_use]
    pub fn activity(&self) -> &ActivityLog {
        &self.inner.activity
    }
}
