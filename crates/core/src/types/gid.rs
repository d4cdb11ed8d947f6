//! Shopify global ID (GID) parsing.
//!
//! The Admin GraphQL API identifies every resource with a global ID of the
//! form `gid://shopify/<Type>/<numeric id>`. Local mirror tables store only
//! the numeric tail, so syncs and lookups need to convert in both directions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ShopifyGid`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GidError {
    /// The input does not start with the `gid://shopify/` prefix and is not
    /// a bare numeric ID either.
    #[error("not a Shopify GID or numeric id: {0:?}")]
    Malformed(String),
    /// The trailing segment is not numeric.
    #[error("GID tail is not numeric: {0:?}")]
    NonNumericTail(String),
}

/// A parsed Shopify global ID.
///
/// Parsing accepts both the full `gid://shopify/Product/123` form and a bare
/// numeric string (`"123"`), since sync payloads arrive in either shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopifyGid {
    /// Resource type segment (e.g., `Product`, `Order`). Empty when parsed
    /// from a bare numeric ID.
    resource: String,
    /// Numeric tail as a string (Shopify IDs exceed u32 range).
    numeric: String,
}

const GID_PREFIX: &str = "gid://shopify/";

impl ShopifyGid {
    /// Parse a GID from either the full `gid://` form or a bare numeric ID.
    ///
    /// # Errors
    ///
    /// Returns `GidError` if the input is neither form, or the tail is not
    /// all digits.
    pub fn parse(input: &str) -> Result<Self, GidError> {
        if let Some(rest) = input.strip_prefix(GID_PREFIX) {
            let (resource, numeric) = rest
                .split_once('/')
                .ok_or_else(|| GidError::Malformed(input.to_owned()))?;
            if resource.is_empty() {
                return Err(GidError::Malformed(input.to_owned()));
            }
            Self::check_numeric(numeric)?;
            return Ok(Self {
                resource: resource.to_owned(),
                numeric: numeric.to_owned(),
            });
        }

        // Bare numeric form, as sent by the dashboard sync payloads.
        Self::check_numeric(input)?;
        Ok(Self {
            resource: String::new(),
            numeric: input.to_owned(),
        })
    }

    /// Build a GID for a known resource type and numeric ID.
    #[must_use]
    pub fn build(resource: &str, numeric: &str) -> Self {
        Self {
            resource: resource.to_owned(),
            numeric: numeric.to_owned(),
        }
    }

    fn check_numeric(s: &str) -> Result<(), GidError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GidError::NonNumericTail(s.to_owned()));
        }
        Ok(())
    }

    /// The numeric tail, as stored in local mirror tables.
    #[must_use]
    pub fn numeric(&self) -> &str {
        &self.numeric
    }

    /// The resource type segment, if known.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl fmt::Display for ShopifyGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.resource.is_empty() {
            write!(f, "{}", self.numeric)
        } else {
            write!(f, "{GID_PREFIX}{}/{}", self.resource, self.numeric)
        }
    }
}

impl std::str::FromStr for ShopifyGid {
    type Err = GidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_gid() {
        let gid = ShopifyGid::parse("gid://shopify/Product/123").unwrap();
        assert_eq!(gid.numeric(), "123");
        assert_eq!(gid.resource(), "Product");
    }

    #[test]
    fn test_parse_bare_numeric() {
        let gid = ShopifyGid::parse("8214690988").unwrap();
        assert_eq!(gid.numeric(), "8214690988");
        assert_eq!(gid.resource(), "");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ShopifyGid::parse("deck-8.25").is_err());
        assert!(ShopifyGid::parse("gid://shopify/Product/abc").is_err());
        assert!(ShopifyGid::parse("gid://shopify/Product").is_err());
        assert!(ShopifyGid::parse("").is_err());
    }

    #[test]
    fn test_build_and_display() {
        let gid = ShopifyGid::build("Order", "55");
        assert_eq!(gid.to_string(), "gid://shopify/Order/55");
    }

    #[test]
    fn test_display_bare() {
        let gid = ShopifyGid::parse("42").unwrap();
        assert_eq!(gid.to_string(), "42");
    }
}
