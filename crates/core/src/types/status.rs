//! Status enums for mirrored Shopify entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product lifecycle status.
///
/// Maps to Shopify's `ProductStatus` values. Order financial and
/// fulfillment statuses are kept as the raw display strings Shopify
/// returns; their value set is open-ended and the mirror never branches
/// on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    #[default]
    Draft,
    Archived,
}

impl ProductStatus {
    /// The wire representation Shopify expects.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Draft => "DRAFT",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "DRAFT" => Ok(Self::Draft),
            "ARCHIVED" => Ok(Self::Archived),
            other => Err(format!("unknown product status: {other}")),
        }
    }
}

/// Derived promotion state.
///
/// Never persisted: computed at read time from the promotion's active flag
/// and date range, so a stored row can't go stale when its window passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    /// Start date is in the future.
    Scheduled,
    /// Inside the date window and the active flag is set.
    Active,
    /// End date has passed.
    Expired,
    /// Active flag cleared by an administrator.
    Disabled,
}

impl PromotionStatus {
    /// Compute the state of a promotion at instant `now`.
    #[must_use]
    pub fn compute(
        active: bool,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if !active {
            return Self::Disabled;
        }
        if now < starts_at {
            return Self::Scheduled;
        }
        match ends_at {
            Some(end) if now > end => Self::Expired,
            _ => Self::Active,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_promotion_scheduled_before_start() {
        let status = PromotionStatus::compute(true, at(2026, 9, 1), None, at(2026, 8, 1));
        assert_eq!(status, PromotionStatus::Scheduled);
    }

    #[test]
    fn test_promotion_active_inside_window() {
        let status =
            PromotionStatus::compute(true, at(2026, 8, 1), Some(at(2026, 9, 1)), at(2026, 8, 15));
        assert_eq!(status, PromotionStatus::Active);
    }

    #[test]
    fn test_promotion_active_without_end_date() {
        let status = PromotionStatus::compute(true, at(2026, 8, 1), None, at(2030, 1, 1));
        assert_eq!(status, PromotionStatus::Active);
    }

    #[test]
    fn test_promotion_expired_after_end() {
        let status =
            PromotionStatus::compute(true, at(2026, 8, 1), Some(at(2026, 9, 1)), at(2026, 9, 2));
        assert_eq!(status, PromotionStatus::Expired);
    }

    #[test]
    fn test_promotion_disabled_overrides_dates() {
        let status =
            PromotionStatus::compute(false, at(2026, 8, 1), Some(at(2026, 9, 1)), at(2026, 8, 15));
        assert_eq!(status, PromotionStatus::Disabled);
    }

    #[test]
    fn test_product_status_wire_format() {
        let status: ProductStatus = serde_json::from_str("\"ARCHIVED\"").unwrap();
        assert_eq!(status, ProductStatus::Archived);
        assert_eq!(status.as_str(), "ARCHIVED");
    }

    #[test]
    fn test_product_status_parse() {
        assert_eq!("ACTIVE".parse::<ProductStatus>().unwrap(), ProductStatus::Active);
        assert!("active".parse::<ProductStatus>().is_err());
        assert!("PUBLISHED".parse::<ProductStatus>().is_err());
    }
}
