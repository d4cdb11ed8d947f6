//! Read endpoints over the local mirror tables.
//!
//! These serve whatever the last successful sync left behind and never
//! touch Shopify. Promotion rows gain a computed `estado` field at read
//! time.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde_json::{Value, json};

use crate::db::{
    CollectionRepository, CustomerRepository, OrderRepository, ProductRepository,
    PromotionRepository,
};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{
    CollectionRecord, CustomerRecord, OrderRecord, ProductRecord, PromotionRecord,
};
use crate::state::AppState;

/// GET /api/db/productos
///
/// # Errors
///
/// Propagates database failures.
pub async fn list_productos(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<ProductRecord>>, AppError> {
    let rows = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(rows))
}

/// GET /api/db/productos/{id}
///
/// # Errors
///
/// Returns 404 for unknown products.
pub async fn get_producto(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ProductRecord>, AppError> {
    let row = ProductRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))?;
    Ok(Json(row))
}

/// GET /api/db/colecciones
///
/// # Errors
///
/// Propagates database failures.
pub async fn list_colecciones(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<CollectionRecord>>, AppError> {
    let rows = CollectionRepository::new(state.pool()).list_all().await?;
    Ok(Json(rows))
}

/// GET /api/db/colecciones/{id}
///
/// # Errors
///
/// Returns 404 for unknown collections.
pub async fn get_coleccion(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<CollectionRecord>, AppError> {
    let row = CollectionRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Colección no encontrada".to_string()))?;
    Ok(Json(row))
}

/// GET /api/db/clientes
///
/// # Errors
///
/// Propagates database failures.
pub async fn list_clientes(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<CustomerRecord>>, AppError> {
    let rows = CustomerRepository::new(state.pool()).list_all().await?;
    Ok(Json(rows))
}

/// GET /api/db/clientes/{id}
///
/// # Errors
///
/// Returns 404 for unknown customers.
pub async fn get_cliente(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<CustomerRecord>, AppError> {
    let row = CustomerRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;
    Ok(Json(row))
}

/// GET /api/db/pedidos
///
/// # Errors
///
/// Propagates database failures.
pub async fn list_pedidos(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<OrderRecord>>, AppError> {
    let rows = OrderRepository::new(state.pool()).list_all().await?;
    Ok(Json(rows))
}

/// GET /api/db/pedidos/{id}
///
/// # Errors
///
/// Returns 404 for unknown orders.
pub async fn get_pedido(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<OrderRecord>, AppError> {
    let row = OrderRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Pedido no encontrado".to_string()))?;
    Ok(Json(row))
}

/// Serialize a promotion row with its derived `estado`.
fn promotion_json(row: &PromotionRecord) -> Result<Value, AppError> {
    let mut value = serde_json::to_value(row)
        .map_err(|e| AppError::Internal(format!("serialization failed: {e}")))?;
    value["estado"] = json!(row.estado(Utc::now()));
    Ok(value)
}

/// GET /api/db/promociones
///
/// # Errors
///
/// Propagates database failures.
pub async fn list_promociones(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Value>>, AppError> {
    let rows = PromotionRepository::new(state.pool()).list_all().await?;
    let values = rows
        .iter()
        .map(promotion_json)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(values))
}

/// GET /api/db/promociones/{id}
///
/// # Errors
///
/// Returns 404 with `Promoción no encontrada` for unknown promotions.
pub async fn get_promocion(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let row = PromotionRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Promoción no encontrada".to_string()))?;
    Ok(Json(promotion_json(&row)?))
}
