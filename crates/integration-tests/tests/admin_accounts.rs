//! Integration tests for administrator account management.
//!
//! Requires the stack described in the crate docs. Run with:
//! `cargo test -p granito-integration-tests -- --ignored`

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use granito_integration_tests::{base_url, client, logged_in_client};

/// Unique username per test run, so reruns never collide.
fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_list_requires_session() {
    let resp = client()
        .get(format!("{}/api/administradores", base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_unknown_admin_returns_404_envelope() {
    let client = logged_in_client().await;

    let resp = client
        .get(format!("{}/api/administradores/999999", base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["error"], "Administrador no encontrado");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_create_then_delete_roundtrip() {
    let client = logged_in_client().await;

    let username = unique_username("temporal");
    let resp = client
        .post(format!("{}/api/administradores", base_url()))
        .json(&json!({
            "username": username,
            "email": format!("{username}@granitoskate.com"),
            "password": "temporal-pass-123",
            "nombre_completo": "Cuenta Temporal",
            "rol": "admin"
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(created["username"], username);
    assert!(
        created.get("password_hash").is_none(),
        "hash must never be serialized"
    );
    let id = created["id"].as_i64().expect("missing id");

    let resp = client
        .delete(format!("{}/api/administradores/{id}", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // Second delete finds nothing.
    let resp = client
        .delete(format!("{}/api/administradores/{id}", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_self_delete_is_rejected_without_deleting() {
    let client = logged_in_client().await;

    let me: Value = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON");
    let my_id = me["id"].as_i64().expect("missing id");

    let resp = client
        .delete(format!("{}/api/administradores/{my_id}", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The account still exists.
    let resp = client
        .get(format!("{}/api/administradores/{my_id}", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_duplicate_username_conflicts() {
    let client = logged_in_client().await;

    let username = unique_username("duplicado");
    let payload = json!({
        "username": username,
        "email": format!("{username}@granitoskate.com"),
        "password": "duplicado-pass-123",
        "nombre_completo": "Duplicado",
    });

    let first = client
        .post(format!("{}/api/administradores", base_url()))
        .json(&payload)
        .send()
        .await
        .expect("request failed");
    assert_eq!(first.status(), StatusCode::CREATED);
    let created: Value = first.json().await.expect("invalid JSON");

    let second = client
        .post(format!("{}/api/administradores", base_url()))
        .json(&payload)
        .send()
        .await
        .expect("request failed");
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // Cleanup.
    let id = created["id"].as_i64().expect("missing id");
    let _ = client
        .delete(format!("{}/api/administradores/{id}", base_url()))
        .send()
        .await;
}
