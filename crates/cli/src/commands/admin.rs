//! Administrator management commands.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

use granito_admin::db::{self, AdminRepository};
use granito_core::{AdminRole, Email};

/// Errors from administrator commands.
#[derive(Debug, Error)]
pub enum AdminCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("{0}")]
    Repository(#[from] db::RepositoryError),

    /// Invalid email address.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Invalid role name.
    #[error("Invalid role '{0}': use 'admin' or 'superadmin'")]
    InvalidRole(String),

    /// Password too short.
    #[error("Password must be at least 8 characters")]
    WeakPassword,

    /// Password hashing failed.
    #[error("Hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

async fn connect() -> Result<sqlx::PgPool, AdminCommandError> {
    dotenvy::dotenv().ok();

    let database_url: SecretString = std::env::var("DATABASE_URL")
        .map_err(|_| AdminCommandError::MissingEnvVar("DATABASE_URL"))?
        .into();

    Ok(db::create_pool(&database_url).await?)
}

/// Create an administrator account.
///
/// # Errors
///
/// Returns `AdminCommandError` for invalid input, a duplicate username or
/// email, or database failures.
pub async fn create(
    username: &str,
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> Result<(), AdminCommandError> {
    let email = Email::parse(email)
        .map_err(|e| AdminCommandError::InvalidEmail(e.to_string()))?;
    let role = AdminRole::from_str(role)
        .map_err(|_| AdminCommandError::InvalidRole(role.to_string()))?;
    if password.len() < 8 {
        return Err(AdminCommandError::WeakPassword);
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let pool = connect().await?;
    let admin = AdminRepository::new(&pool)
        .create(username, &email, &password_hash, name, role)
        .await?;

    tracing::info!(
        id = %admin.id,
        username = %admin.username,
        role = %admin.role.as_str(),
        "administrator created"
    );
    Ok(())
}

/// List administrator accounts.
///
/// # Errors
///
/// Returns `AdminCommandError` for database failures.
pub async fn list() -> Result<(), AdminCommandError> {
    let pool = connect().await?;
    let admins = AdminRepository::new(&pool).list_all().await?;

    #[allow(clippy::print_stdout)]
    for admin in admins {
        println!(
            "{:>4}  {:<20}  {:<30}  {:<10}  {}",
            admin.id,
            admin.username,
            admin.email.as_str(),
            admin.role.as_str(),
            if admin.active { "activo" } else { "inactivo" }
        );
    }
    Ok(())
}
