//! Domain models.

pub mod admin;
pub mod mirror;
pub mod session;

pub use admin::Administrator;
pub use mirror::{
    CollectionRecord, CustomerRecord, OrderRecord, ProductRecord, PromotionRecord,
};
pub use session::{CurrentAdmin, keys as session_keys};
