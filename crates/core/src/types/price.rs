//! Decimal money amounts as exchanged with Shopify.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the shop currency.
///
/// Shopify serializes money as decimal strings (`"49.99"`); this wrapper
/// parses them into [`Decimal`] so arithmetic and storage never go through
/// floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap an existing decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a Shopify money string such as `"49.99"`.
    ///
    /// # Errors
    ///
    /// Returns the underlying decimal parse error for non-numeric input.
    pub fn parse(s: &str) -> Result<Self, rust_decimal::Error> {
        s.trim().parse::<Decimal>().map(Self)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_string() {
        let price = Price::parse("49.99").unwrap();
        assert_eq!(price.to_string(), "49.99");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(Price::parse(" 10.00 ").is_ok());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Price::parse("free").is_err());
        assert!(Price::parse("").is_err());
    }

    #[test]
    fn test_exact_decimal() {
        // 0.1 + 0.2 must be exactly 0.3, not 0.30000000000000004
        let sum = Price::parse("0.1").unwrap().amount() + Price::parse("0.2").unwrap().amount();
        assert_eq!(sum, Price::parse("0.3").unwrap().amount());
    }
}
