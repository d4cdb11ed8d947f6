//! Bounded in-memory cache for Shopify API responses.
//!
//! Backed by `moka` with a TTL and a capacity ceiling, so a burst of
//! distinct lookups cannot grow memory without bound. One instance lives
//! in `AppState`; nothing here is a global.

use std::sync::Arc;

use moka::future::Cache;

use crate::config::CacheConfig;
use crate::shopify::{
    ShopifyCollection, ShopifyCustomer, ShopifyOrder, ShopifyProduct, ShopifyPromotion,
};

/// Cache key per Shopify read endpoint.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
    Product(String),
    Collections,
    Collection(String),
    Customers,
    Customer(String),
    Orders,
    Order(String),
    Promotions,
}

/// Cached response payloads. Listing values sit behind an `Arc` so cache
/// hits never clone the full vector.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Arc<Vec<ShopifyProduct>>),
    Product(Arc<ShopifyProduct>),
    Collections(Arc<Vec<ShopifyCollection>>),
    Collection(Arc<ShopifyCollection>),
    Customers(Arc<Vec<ShopifyCustomer>>),
    Customer(Arc<ShopifyCustomer>),
    Orders(Arc<Vec<ShopifyOrder>>),
    Order(Arc<ShopifyOrder>),
    Promotions(Arc<Vec<ShopifyPromotion>>),
}

/// TTL-and-capacity bounded response cache.
#[derive(Clone)]
pub struct ResponseCache {
    cache: Cache<CacheKey, CacheValue>,
}

impl ResponseCache {
    /// Build a cache from its configuration.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.cache.get(key).await
    }

    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        self.cache.insert(key, value).await;
    }

    /// Drop one entry.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.cache.invalidate(key).await;
    }

    /// Drop the product listing and one product entry after a mutation.
    pub async fn invalidate_product(&self, id: &str) {
        self.cache.invalidate(&CacheKey::Products).await;
        self.cache.invalidate(&CacheKey::Product(id.to_string())).await;
    }

    /// Drop the promotion listing after a mutation.
    pub async fn invalidate_promotions(&self) {
        self.cache.invalidate(&CacheKey::Promotions).await;
    }

    /// Drop everything.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn test_config() -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(300),
            max_entries: 8,
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let cache = ResponseCache::new(&test_config());
        cache
            .insert(
                CacheKey::Products,
                CacheValue::Products(Arc::new(Vec::new())),
            )
            .await;

        assert!(cache.get(&CacheKey::Products).await.is_some());
        assert!(cache.get(&CacheKey::Orders).await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_product_drops_listing_and_entry() {
        let cache = ResponseCache::new(&test_config());
        cache
            .insert(
                CacheKey::Products,
                CacheValue::Products(Arc::new(Vec::new())),
            )
            .await;
        cache
            .insert(
                CacheKey::Collections,
                CacheValue::Collections(Arc::new(Vec::new())),
            )
            .await;

        cache.invalidate_product("123").await;

        assert!(cache.get(&CacheKey::Products).await.is_none());
        assert!(cache.get(&CacheKey::Collections).await.is_some());
    }
}
