//! Application services shared across route handlers.
//!
//! Everything here is injected through `AppState` rather than reached as a
//! global, so tests can build their own instances.

pub mod activity;
pub mod cache;
pub mod sync;

pub use activity::{ActivityEntry, ActivityKind, ActivityLog};
pub use cache::{CacheKey, CacheValue, ResponseCache};
pub use sync::{SyncInput, SyncReport};
