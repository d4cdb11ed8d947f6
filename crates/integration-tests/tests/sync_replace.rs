//! Integration tests for the replace syncs and mirror reads.
//!
//! Run with: `cargo test -p granito-integration-tests -- --ignored`

use granito_core::ShopifyGid;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use granito_integration_tests::{base_url, db_pool, logged_in_client};

#[derive(Debug, Deserialize)]
struct SyncReport {
    success: bool,
    upserted: usize,
    deleted: usize,
    errors: usize,
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_malformed_payload_rejected_before_any_write() {
    let client = logged_in_client().await;

    // Snapshot the current mirror.
    let before: Vec<Value> = client
        .get(format!("{}/api/db/productos", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON");

    let resp = client
        .post(format!("{}/api/sync/products-replace", base_url()))
        .json(&json!({ "products": "not-an-array" }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing changed.
    let after: Vec<Value> = client
        .get(format!("{}/api/db/productos", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON");
    assert_eq!(before.len(), after.len());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_inline_replace_leaves_exactly_the_payload_rows() {
    let client = logged_in_client().await;

    let products = json!({
        "products": [
            { "id": "gid://shopify/Product/123", "title": "Deck", "price": "49.99", "inventory": 10 },
            { "id": 456, "title": "Ruedas", "price": "19.50", "inventory": 3 },
            { "id": 789, "title": "Ejes", "price": "29.00", "inventory": 0 }
        ]
    });

    let resp = client
        .post(format!("{}/api/sync/products-replace", base_url()))
        .json(&products)
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let report: SyncReport = resp.json().await.expect("invalid JSON");
    assert!(report.success);
    assert_eq!(report.upserted, 3);
    assert_eq!(report.errors, 0);

    let rows: Vec<Value> = client
        .get(format!("{}/api/db/productos", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON");
    assert_eq!(rows.len(), 3);

    // The GID in the payload is stored stripped to its numeric tail.
    let stored_id = ShopifyGid::parse("gid://shopify/Product/123")
        .expect("valid gid")
        .numeric()
        .to_string();
    let deck = rows
        .iter()
        .find(|r| r["shopify_id"] == stored_id.as_str())
        .expect("missing row 123");
    assert_eq!(deck["titulo"], "Deck");
    assert_eq!(deck["precio_base"], "49.99");
    assert_eq!(deck["inventario_disponible"], 10);

    // The API view matches the table itself.
    let pool = db_pool().await;
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM productos")
        .fetch_one(&pool)
        .await
        .expect("count query failed");
    assert_eq!(count, 3);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_replace_is_idempotent() {
    let client = logged_in_client().await;

    let payload = json!({
        "products": [
            { "id": 1, "title": "Uno", "price": "1.00" },
            { "id": 2, "title": "Dos", "price": "2.00" }
        ]
    });

    let mut last_report = None;
    for _ in 0..2 {
        let resp = client
            .post(format!("{}/api/sync/products-replace", base_url()))
            .json(&payload)
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::OK);
        last_report = Some(resp.json::<SyncReport>().await.expect("invalid JSON"));
    }

    // The second pass touches the same two rows and prunes nothing.
    let report = last_report.expect("no report");
    assert_eq!(report.upserted, 2);
    assert_eq!(report.deleted, 0);

    let rows: Vec<Value> = client
        .get(format!("{}/api/db/productos", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_unknown_promotion_returns_spanish_404() {
    let client = logged_in_client().await;

    let resp = client
        .get(format!("{}/api/db/promociones/does-not-exist", base_url()))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("invalid JSON");
    assert_eq!(body["error"], "Promoción no encontrada");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_promotion_estado_is_derived() {
    let client = logged_in_client().await;

    let resp = client
        .post(format!("{}/api/sync/promotions-replace", base_url()))
        .json(&json!({
            "promotions": [{
                "id": 42,
                "title": "Rebajas",
                "code": "SKATE10",
                "type": "percentage",
                "value": "10",
                "starts_at": "2000-01-01T00:00:00Z",
                "ends_at": "2000-12-31T23:59:59Z",
                "active": true
            }]
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let promo: Value = client
        .get(format!("{}/api/db/promociones/42", base_url()))
        .send()
        .await
        .expect("request failed")
        .json()
        .await
        .expect("invalid JSON");

    // Window long past, so the stored `activa` flag is overridden.
    assert_eq!(promo["estado"], "expired");
    assert_eq!(promo["activa"], true);
}
