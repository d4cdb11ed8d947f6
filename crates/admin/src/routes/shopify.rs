//! Live Shopify proxy endpoints.
//!
//! Reads go through the response cache; mutations invalidate the affected
//! entries before returning.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use granito_core::ProductStatus;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::services::{ActivityKind, CacheKey, CacheValue};
use crate::shopify::{
    ProductCreateInput, ProductUpdateInput, PromotionCreateInput, ShopifyCollection,
    ShopifyCustomer, ShopifyOrder, ShopifyProduct, ShopifyPromotion,
};
use crate::state::AppState;

fn record_api_call(state: &AppState, admin: &crate::models::CurrentAdmin, what: &str) {
    state.activity().record(
        ActivityKind::ApiCall,
        format!("Consulta a Shopify: {what}"),
        Some(&admin.username),
    );
}

// =========================================================================
// Products
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    /// Shopify search query, e.g. `title:deck*`.
    pub query: Option<String>,
}

/// GET /api/shopify/products?query=
///
/// # Errors
///
/// Returns 502 when Shopify is unreachable.
pub async fn list_products(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<ProductListParams>,
) -> Result<Json<Arc<Vec<ShopifyProduct>>>, AppError> {
    // Filtered listings bypass the cache; only the full listing is cached.
    if let Some(query) = params.query.as_deref() {
        let products = Arc::new(state.shopify().list_products(Some(query)).await?);
        record_api_call(&state, &admin, "búsqueda de productos");
        return Ok(Json(products));
    }

    if let Some(CacheValue::Products(products)) = state.cache().get(&CacheKey::Products).await {
        return Ok(Json(products));
    }

    let products = Arc::new(state.shopify().list_products(None).await?);
    state
        .cache()
        .insert(CacheKey::Products, CacheValue::Products(Arc::clone(&products)))
        .await;
    record_api_call(&state, &admin, "listado de productos");

    Ok(Json(products))
}

/// GET /api/shopify/products/{id}
///
/// # Errors
///
/// Returns 404 for unknown products.
pub async fn get_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Arc<ShopifyProduct>>, AppError> {
    let key = CacheKey::Product(id.clone());
    if let Some(CacheValue::Product(product)) = state.cache().get(&key).await {
        return Ok(Json(product));
    }

    let product = Arc::new(state.shopify().get_product(&id).await.map_err(not_found_as_404)?);
    state
        .cache()
        .insert(key, CacheValue::Product(Arc::clone(&product)))
        .await;
    record_api_call(&state, &admin, &format!("producto {id}"));

    Ok(Json(product))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "El título es obligatorio"))]
    pub title: String,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `ACTIVE`, `DRAFT` or `ARCHIVED`.
    pub status: Option<String>,
}

/// Map a payload status string onto the statuses Shopify accepts.
fn parse_product_status(raw: &str) -> Result<ProductStatus, AppError> {
    raw.parse().map_err(|_| {
        AppError::BadRequest("Estado inválido: usa 'ACTIVE', 'DRAFT' o 'ARCHIVED'".to_string())
    })
}

/// POST /api/shopify/products
///
/// # Errors
///
/// Returns 400 for invalid payloads and 502 for upstream failures.
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<CreateProductPayload>,
) -> Result<(StatusCode, Json<ShopifyProduct>), AppError> {
    payload.validate()?;

    let input = ProductCreateInput {
        title: payload.title,
        description_html: payload.description,
        vendor: payload.vendor,
        product_type: payload.product_type,
        tags: payload.tags,
        status: payload.status.as_deref().map(parse_product_status).transpose()?,
    };

    let product = state.shopify().create_product(&input).await?;
    state.cache().invalidate_product(&product.id).await;
    state.activity().record(
        ActivityKind::ApiCall,
        format!("Producto creado en Shopify: {}", product.titulo),
        Some(&admin.username),
    );

    Ok((StatusCode::CREATED, Json(product)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

/// PUT /api/shopify/products/{id}
///
/// # Errors
///
/// Returns 404 for unknown products and 502 for upstream failures.
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<Json<ShopifyProduct>, AppError> {
    let input = ProductUpdateInput {
        title: payload.title,
        description_html: payload.description,
        vendor: payload.vendor,
        product_type: payload.product_type,
        tags: payload.tags,
        status: payload.status.as_deref().map(parse_product_status).transpose()?,
    };

    let product = state
        .shopify()
        .update_product(&id, &input)
        .await
        .map_err(not_found_as_404)?;
    state.cache().invalidate_product(&id).await;
    state.activity().record(
        ActivityKind::ApiCall,
        format!("Producto {id} actualizado en Shopify"),
        Some(&admin.username),
    );

    Ok(Json(product))
}

/// DELETE /api/shopify/products/{id}
///
/// # Errors
///
/// Returns 404 for unknown products and 502 for upstream failures.
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted_id = state
        .shopify()
        .delete_product(&id)
        .await
        .map_err(not_found_as_404)?;
    state.cache().invalidate_product(&id).await;
    state.activity().record(
        ActivityKind::ApiCall,
        format!("Producto {deleted_id} eliminado en Shopify"),
        Some(&admin.username),
    );

    Ok(Json(serde_json::json!({ "success": true, "id": deleted_id })))
}

// =========================================================================
// Collections / customers / orders (read only)
// =========================================================================

/// GET /api/shopify/collections
///
/// # Errors
///
/// Returns 502 when Shopify is unreachable.
pub async fn list_collections(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Arc<Vec<ShopifyCollection>>>, AppError> {
    if let Some(CacheValue::Collections(collections)) =
        state.cache().get(&CacheKey::Collections).await
    {
        return Ok(Json(collections));
    }

    let collections = Arc::new(state.shopify().list_collections().await?);
    state
        .cache()
        .insert(
            CacheKey::Collections,
            CacheValue::Collections(Arc::clone(&collections)),
        )
        .await;
    record_api_call(&state, &admin, "listado de colecciones");

    Ok(Json(collections))
}

/// GET /api/shopify/collections/{id}
///
/// # Errors
///
/// Returns 404 for unknown collections.
pub async fn get_collection(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Arc<ShopifyCollection>>, AppError> {
    let key = CacheKey::Collection(id.clone());
    if let Some(CacheValue::Collection(collection)) = state.cache().get(&key).await {
        return Ok(Json(collection));
    }

    let collection = Arc::new(
        state
            .shopify()
            .get_collection(&id)
            .await
            .map_err(not_found_as_404)?,
    );
    state
        .cache()
        .insert(key, CacheValue::Collection(Arc::clone(&collection)))
        .await;
    record_api_call(&state, &admin, &format!("colección {id}"));

    Ok(Json(collection))
}

/// GET /api/shopify/customers
///
/// # Errors
///
/// Returns 502 when Shopify is unreachable.
pub async fn list_customers(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Arc<Vec<ShopifyCustomer>>>, AppError> {
    if let Some(CacheValue::Customers(customers)) = state.cache().get(&CacheKey::Customers).await {
        return Ok(Json(customers));
    }

    let customers = Arc::new(state.shopify().list_customers().await?);
    state
        .cache()
        .insert(
            CacheKey::Customers,
            CacheValue::Customers(Arc::clone(&customers)),
        )
        .await;
    record_api_call(&state, &admin, "listado de clientes");

    Ok(Json(customers))
}

/// GET /api/shopify/customers/{id}
///
/// # Errors
///
/// Returns 404 for unknown customers.
pub async fn get_customer(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Arc<ShopifyCustomer>>, AppError> {
    let key = CacheKey::Customer(id.clone());
    if let Some(CacheValue::Customer(customer)) = state.cache().get(&key).await {
        return Ok(Json(customer));
    }

    let customer = Arc::new(
        state
            .shopify()
            .get_customer(&id)
            .await
            .map_err(not_found_as_404)?,
    );
    state
        .cache()
        .insert(key, CacheValue::Customer(Arc::clone(&customer)))
        .await;
    record_api_call(&state, &admin, &format!("cliente {id}"));

    Ok(Json(customer))
}

/// GET /api/shopify/orders
///
/// # Errors
///
/// Returns 502 when Shopify is unreachable.
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Arc<Vec<ShopifyOrder>>>, AppError> {
    if let Some(CacheValue::Orders(orders)) = state.cache().get(&CacheKey::Orders).await {
        return Ok(Json(orders));
    }

    let orders = Arc::new(state.shopify().list_orders().await?);
    state
        .cache()
        .insert(CacheKey::Orders, CacheValue::Orders(Arc::clone(&orders)))
        .await;
    record_api_call(&state, &admin, "listado de pedidos");

    Ok(Json(orders))
}

/// GET /api/shopify/orders/{id}
///
/// # Errors
///
/// Returns 404 for unknown orders.
pub async fn get_order(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<Arc<ShopifyOrder>>, AppError> {
    let key = CacheKey::Order(id.clone());
    if let Some(CacheValue::Order(order)) = state.cache().get(&key).await {
        return Ok(Json(order));
    }

    let order = Arc::new(state.shopify().get_order(&id).await.map_err(not_found_as_404)?);
    state
        .cache()
        .insert(key, CacheValue::Order(Arc::clone(&order)))
        .await;
    record_api_call(&state, &admin, &format!("pedido {id}"));

    Ok(Json(order))
}

// =========================================================================
// Promotions
// =========================================================================

/// GET /api/shopify/promotions
///
/// # Errors
///
/// Returns 502 when Shopify is unreachable.
pub async fn list_promotions(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<Json<Arc<Vec<ShopifyPromotion>>>, AppError> {
    if let Some(CacheValue::Promotions(promotions)) =
        state.cache().get(&CacheKey::Promotions).await
    {
        return Ok(Json(promotions));
    }

    let promotions = Arc::new(state.shopify().list_promotions().await?);
    state
        .cache()
        .insert(
            CacheKey::Promotions,
            CacheValue::Promotions(Arc::clone(&promotions)),
        )
        .await;
    record_api_call(&state, &admin, "listado de promociones");

    Ok(Json(promotions))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePromotionPayload {
    #[validate(length(min = 1, message = "El título es obligatorio"))]
    pub titulo: String,
    #[validate(length(min = 1, message = "El código es obligatorio"))]
    pub codigo: String,
    /// `percentage` or `fixed_amount`.
    pub tipo: String,
    pub valor: Decimal,
    pub comienza_en: DateTime<Utc>,
    pub termina_en: Option<DateTime<Utc>>,
    pub limite_uso: Option<i32>,
}

/// POST /api/shopify/promotions
///
/// # Errors
///
/// Returns 400 for invalid payloads and 502 for upstream failures.
pub async fn create_promotion(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(payload): Json<CreatePromotionPayload>,
) -> Result<(StatusCode, Json<ShopifyPromotion>), AppError> {
    payload.validate()?;

    if payload.tipo != "percentage" && payload.tipo != "fixed_amount" {
        return Err(AppError::BadRequest(
            "El tipo debe ser 'percentage' o 'fixed_amount'".to_string(),
        ));
    }
    if payload.valor <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "El valor debe ser mayor que cero".to_string(),
        ));
    }

    let input = PromotionCreateInput {
        titulo: payload.titulo,
        codigo: payload.codigo,
        tipo: payload.tipo,
        valor: payload.valor,
        comienza_en: payload.comienza_en,
        termina_en: payload.termina_en,
        limite_uso: payload.limite_uso,
    };

    let promotion = state.shopify().create_promotion(&input).await?;
    state.cache().invalidate_promotions().await;
    state.activity().record(
        ActivityKind::ApiCall,
        format!("Promoción creada en Shopify: {}", promotion.titulo),
        Some(&admin.username),
    );

    Ok((StatusCode::CREATED, Json(promotion)))
}

/// POST /api/shopify/promotions/{id}/deactivate
///
/// # Errors
///
/// Returns 404 for unknown promotions and 502 for upstream failures.
pub async fn deactivate_promotion(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<ShopifyPromotion>, AppError> {
    let promotion = state
        .shopify()
        .deactivate_promotion(&id)
        .await
        .map_err(not_found_as_404)?;
    state.cache().invalidate_promotions().await;
    state.activity().record(
        ActivityKind::ApiCall,
        format!("Promoción {id} desactivada en Shopify"),
        Some(&admin.username),
    );

    Ok(Json(promotion))
}

/// Surface an upstream `NotFound` as a 404 instead of a 502.
fn not_found_as_404(err: crate::shopify::ShopifyError) -> AppError {
    match err {
        crate::shopify::ShopifyError::NotFound(what) => {
            AppError::NotFound(format!("No encontrado: {what}"))
        }
        other => AppError::Shopify(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_status_accepts_shopify_values() {
        assert_eq!(
            parse_product_status("ARCHIVED").unwrap(),
            ProductStatus::Archived
        );
    }

    #[test]
    fn test_parse_product_status_rejects_unknown_values() {
        assert!(matches!(
            parse_product_status("PUBLISHED"),
            Err(AppError::BadRequest(_))
        ));
    }
}
