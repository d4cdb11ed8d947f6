//! Shared helpers for the integration tests.
//!
//! The tests in `tests/` expect:
//! - A running `PostgreSQL` database with migrations applied
//!   (`cargo run -p granito-cli -- migrate`)
//! - The management backend running (`cargo run -p granito-admin`)
//! - A seeded superadmin account named by `TEST_ADMIN_USERNAME` /
//!   `TEST_ADMIN_PASSWORD` (defaults `test-admin` / `test-password`)
//!
//! Every test that talks to the server is `#[ignore]`d so `cargo test`
//! stays green without the stack up.

use reqwest::Client;
use secrecy::SecretString;
use serde_json::json;
use sqlx::PgPool;

/// Base URL of the management backend under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Cookie-keeping HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Direct connection to the database behind the server under test, for
/// asserting on mirror rows without going through the API.
///
/// # Panics
///
/// Panics when `DATABASE_URL` is unset or the connection fails.
pub async fn db_pool() -> PgPool {
    let url = SecretString::from(std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));
    granito_admin::db::create_pool(&url)
        .await
        .expect("Failed to connect to test database")
}

/// Log in with the seeded test account and return a session-bearing client.
///
/// # Panics
///
/// Panics when the login request fails or is rejected.
pub async fn logged_in_client() -> Client {
    let username =
        std::env::var("TEST_ADMIN_USERNAME").unwrap_or_else(|_| "test-admin".to_string());
    let password =
        std::env::var("TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "test-password".to_string());

    let client = client();
    let resp = client
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("login request failed");
    assert!(
        resp.status().is_success(),
        "login rejected: {}",
        resp.status()
    );

    client
}
