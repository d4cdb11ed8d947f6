//! Shopify Admin API GraphQL client.
//!
//! The GraphQL Admin API is the single upstream for every Shopify resource
//! this service touches. All identifiers leave this module as the numeric
//! tail of the GID, so callers never handle `gid://` strings.
//!
//! # Example
//!
//! ```rust,ignore
//! use granito_admin::shopify::ShopifyClient;
//!
//! let client = ShopifyClient::new(&config.shopify);
//! let products = client.list_products(None).await?;
//! let product = client.get_product("1234567890").await?;
//! ```

mod client;
mod collections;
mod conversions;
mod customers;
mod discounts;
mod orders;
mod products;
pub mod queries;
pub mod types;

pub use client::ShopifyClient;
pub use discounts::PromotionCreateInput;
pub use products::{ProductCreateInput, ProductUpdateInput};
pub use types::{
    ShopifyCollection, ShopifyCustomer, ShopifyOrder, ShopifyProduct, ShopifyPromotion,
};

use thiserror::Error;

/// Errors from the Shopify Admin API client.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User error from a mutation (invalid input).
    #[error("User error: {0}")]
    UserError(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopify_error_display() {
        let err = ShopifyError::NotFound("producto 123".to_string());
        assert_eq!(err.to_string(), "Not found: producto 123");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                path: vec![],
            },
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ShopifyError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
