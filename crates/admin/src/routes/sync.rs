//! Replace-sync endpoints.
//!
//! Each endpoint accepts `{ "<resource>": [items] }` to sync an inline
//! payload, or an empty body to pull the full listing from Shopify. Payload
//! shape is validated before a single row changes.

use axum::{Json, extract::State};
use serde_json::Value;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::services::sync;
use crate::services::{ActivityKind, SyncInput, SyncReport};
use crate::state::AppState;

fn record_sync(state: &AppState, admin: &crate::models::CurrentAdmin, report: &SyncReport) {
    state.activity().record(
        ActivityKind::Sync,
        format!(
            "Sync de {}: {} filas actualizadas, {} eliminadas",
            report.resource, report.upserted, report.deleted
        ),
        Some(&admin.username),
    );
}

/// POST /api/sync/products-replace
///
/// # Errors
///
/// Returns 400 when `products` is present but not an array, 502 when the
/// Shopify fetch fails and 500 when the write fails.
pub async fn products_replace(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Option<Json<Value>>,
) -> Result<Json<SyncReport>, AppError> {
    let body = body.map_or(Value::Null, |Json(v)| v);
    let input = SyncInput::from_body(&body, "products")?;
    let report = sync::sync_products(state.pool(), state.shopify(), input).await?;
    record_sync(&state, &admin, &report);
    Ok(Json(report))
}

/// POST /api/sync/collections-replace
///
/// # Errors
///
/// Same failure modes as [`products_replace`], keyed on `collections`.
pub async fn collections_replace(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Option<Json<Value>>,
) -> Result<Json<SyncReport>, AppError> {
    let body = body.map_or(Value::Null, |Json(v)| v);
    let input = SyncInput::from_body(&body, "collections")?;
    let report = sync::sync_collections(state.pool(), state.shopify(), input).await?;
    record_sync(&state, &admin, &report);
    Ok(Json(report))
}

/// POST /api/sync/customers-replace
///
/// # Errors
///
/// Same failure modes as [`products_replace`], keyed on `customers`.
pub async fn customers_replace(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Option<Json<Value>>,
) -> Result<Json<SyncReport>, AppError> {
    let body = body.map_or(Value::Null, |Json(v)| v);
    let input = SyncInput::from_body(&body, "customers")?;
    let report = sync::sync_customers(state.pool(), state.shopify(), input).await?;
    record_sync(&state, &admin, &report);
    Ok(Json(report))
}

/// POST /api/sync/orders-replace
///
/// # Errors
///
/// Same failure modes as [`products_replace`], keyed on `orders`.
pub async fn orders_replace(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Option<Json<Value>>,
) -> Result<Json<SyncReport>, AppError> {
    let body = body.map_or(Value::Null, |Json(v)| v);
    let input = SyncInput::from_body(&body, "orders")?;
    let report = sync::sync_orders(state.pool(), state.shopify(), input).await?;
    record_sync(&state, &admin, &report);
    Ok(Json(report))
}

/// POST /api/sync/promotions-replace
///
/// # Errors
///
/// Same failure modes as [`products_replace`], keyed on `promotions`.
pub async fn promotions_replace(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    body: Option<Json<Value>>,
) -> Result<Json<SyncReport>, AppError> {
    let body = body.map_or(Value::Null, |Json(v)| v);
    let input = SyncInput::from_body(&body, "promotions")?;
    let report = sync::sync_promotions(state.pool(), state.shopify(), input).await?;
    record_sync(&state, &admin, &report);
    Ok(Json(report))
}
