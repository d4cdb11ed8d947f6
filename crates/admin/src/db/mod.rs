//! Database operations for the management backend.
//!
//! ## Tables
//!
//! - `administradores` - Administrator accounts and roles
//! - `productos`, `colecciones`, `clientes`, `pedidos`, `promociones` -
//!   local mirrors of Shopify resources, refreshed by the replace syncs
//!
//! Mirror tables are keyed by the numeric tail of the Shopify GID and carry
//! no foreign keys between each other: every resource syncs independently.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p granito-cli -- migrate
//! ```

pub mod admins;
pub mod collections;
pub mod customers;
pub mod orders;
pub mod products;
pub mod promotions;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admins::AdminRepository;
pub use collections::CollectionRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use promotions::PromotionRepository;

/// Embedded sqlx migrations for the admin database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username/email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Outcome of a replace-style sync against one mirror table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReplaceOutcome {
    /// Rows inserted or updated.
    pub upserted: usize,
    /// Orphan rows pruned after the upserts.
    pub deleted: usize,
}

/// Create a PostgreSQL connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a sqlx unique-violation error into `RepositoryError::Conflict`.
fn conflict_on_unique(err: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(err)
}
