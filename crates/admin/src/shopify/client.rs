//! Core GraphQL transport for the Shopify Admin API.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::ShopifyConfig;

use super::types::{Connection, PageInfo};
use super::{GraphQLError, ShopifyError};

/// Nodes fetched per page when following cursors.
pub(super) const PAGE_SIZE: i64 = 250;

/// Hard ceiling on pages followed in one listing, as a runaway guard.
const MAX_PAGES: usize = 40;

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; the HTTP client and credentials live behind an `Arc`.
#[derive(Clone)]
pub struct ShopifyClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

impl ShopifyClient {
    /// Create a new client from the Shopify configuration.
    #[must_use]
    pub fn new(config: &ShopifyConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            config.shop_domain, config.api_version
        );

        Self {
            inner: Arc::new(ClientInner {
                client,
                endpoint,
                access_token: config.access_token.expose_secret().to_string(),
            }),
        }
    }

    /// Execute one GraphQL document and deserialize `data` into `T`.
    ///
    /// # Errors
    ///
    /// Returns `RateLimited` on 429 (honoring `Retry-After`), `Unauthorized`
    /// on 401, `GraphQL` when the response carries errors, and `Http`/`Parse`
    /// for transport and decoding failures.
    pub(super) async fn execute<T>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ShopifyError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    path: e.path,
                })
                .collect();
            return Err(ShopifyError::GraphQL(converted));
        }

        graphql_response.data.ok_or_else(|| {
            ShopifyError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                path: vec![],
            }])
        })
    }

    /// Follow `pageInfo.endCursor` until the listing is exhausted.
    ///
    /// `fetch` receives the cursor for the next page and returns one
    /// connection page. The returned future must be `Send` so listings can
    /// run inside handler futures.
    pub(super) async fn paginate<T, F, Fut>(&self, mut fetch: F) -> Result<Vec<T>, ShopifyError>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<Connection<T>, ShopifyError>> + Send,
    {
        let mut nodes = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let page = fetch(cursor.take()).await?;
            let PageInfo {
                has_next_page,
                end_cursor,
            } = page.page_info;
            nodes.extend(page.edges.into_iter().map(|edge| edge.node));

            if !has_next_page {
                return Ok(nodes);
            }
            cursor = end_cursor;
            if cursor.is_none() {
                return Ok(nodes);
            }
        }

        Ok(nodes)
    }

    /// Surface mutation `userErrors` as `ShopifyError::UserError`.
    ///
    /// # Errors
    ///
    /// Returns `UserError` when the slice is non-empty.
    pub(super) fn check_user_errors(
        errors: &[super::types::UserError],
    ) -> Result<(), ShopifyError> {
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(|e| e.message.clone())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ShopifyError::UserError(joined))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn test_client() -> ShopifyClient {
        ShopifyClient::new(&ShopifyConfig {
            shop_domain: "granitoskate.myshopify.com".to_string(),
            api_version: "2024-01".to_string(),
            access_token: SecretString::from("shpat_test_token"),
        })
    }

    fn assert_send<T: Send>(_: &T) {}

    // Listing futures run inside axum handler futures, which the runtime
    // moves across threads.
    #[test]
    fn test_listing_futures_are_send() {
        let client = test_client();
        assert_send(&client.list_products(None));
        assert_send(&client.list_collections());
        assert_send(&client.list_customers());
        assert_send(&client.list_orders());
        assert_send(&client.list_promotions());
    }
}
