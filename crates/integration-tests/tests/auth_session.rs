//! Integration tests for session auth, the activity log and diagnostics.
//!
//! Run with: `cargo test -p granito-integration-tests -- --ignored`

use reqwest::StatusCode;
use serde_json::{Value, json};

use granito_integration_tests::{base_url, client, logged_in_client};

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_health_is_open() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_wrong_password_gets_401_envelope() {
    let resp = client()
        .post(format!("{}/api/auth/login", base_url()))
        .json(&json!({ "username": "test-admin", "password": "definitely-wrong" }))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["error"], "Credenciales inválidas");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_login_then_me_then_logout() {
    let client = logged_in_client().await;

    let me: Value = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON");
    assert!(me["username"].is_string());

    let resp = client
        .post(format!("{}/api/auth/logout", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // Session gone.
    let resp = client
        .get(format!("{}/api/auth/me", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_login_appears_in_activity_log() {
    let client = logged_in_client().await;

    let entries: Vec<Value> = client
        .get(format!("{}/api/activity?tipo=login", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON");

    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e["tipo"] == "login"));
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_env_report_is_presence_only() {
    let client = logged_in_client().await;

    let resp = client
        .get(format!("{}/api/system/env", base_url()))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("invalid JSON");
    let variables = body["variables"].as_object().expect("missing variables");
    assert!(variables.contains_key("DATABASE_URL"));
    // Booleans only, never values.
    assert!(variables.values().all(Value::is_boolean));
}
