//! Replace-style synchronization of Shopify resources into the mirror
//! tables.
//!
//! Each sync accepts either an inline payload of items or, when the payload
//! carries no items, fetches the full listing from Shopify. Items are mapped
//! and validated before any write; rows then change inside one transaction
//! (upsert on `shopify_id`, prune the rest), so a failed sync leaves the
//! previous mirror intact and readers never observe a half-empty table.
//!
//! Items that cannot be mapped are skipped and reported in `detalles`
//! rather than failing the whole sync.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use granito_core::ShopifyGid;

use crate::db::{
    CollectionRepository, CustomerRepository, OrderRepository, ProductRepository,
    PromotionRepository, ReplaceOutcome,
    collections::CollectionUpsert,
    customers::CustomerUpsert,
    orders::OrderUpsert,
    products::ProductUpsert,
    promotions::PromotionUpsert,
};
use crate::error::AppError;
use crate::shopify::{
    ShopifyClient, ShopifyCollection, ShopifyCustomer, ShopifyOrder, ShopifyProduct,
    ShopifyPromotion,
};

/// Cap on per-item messages carried in a report.
const MAX_DETAIL_MESSAGES: usize = 20;

/// Where a sync takes its items from.
#[derive(Debug)]
pub enum SyncInput {
    /// Items supplied in the request body.
    Inline(Vec<Value>),
    /// No items supplied; fetch the full listing from Shopify.
    FetchFromShopify,
}

impl SyncInput {
    /// Extract the sync input from a request body.
    ///
    /// A missing or `null` `key` selects the fetch-from-Shopify mode. Any
    /// other non-array value is rejected before a single row is touched.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when `body[key]` is present but not
    /// an array.
    pub fn from_body(body: &Value, key: &str) -> Result<Self, AppError> {
        match body.get(key) {
            None | Some(Value::Null) => Ok(Self::FetchFromShopify),
            Some(Value::Array(items)) => Ok(Self::Inline(items.clone())),
            Some(_) => Err(AppError::BadRequest(format!(
                "El campo '{key}' debe ser un array"
            ))),
        }
    }
}

/// Result of one replace sync, returned to the caller as JSON.
#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub success: bool,
    #[serde(rename = "recurso")]
    pub resource: &'static str,
    pub upserted: usize,
    pub deleted: usize,
    /// Items in the payload that could not be mapped and were skipped.
    pub errors: usize,
    /// Per-item mapping problems, capped at a handful of messages.
    pub detalles: Vec<String>,
}

impl SyncReport {
    fn new(
        resource: &'static str,
        outcome: ReplaceOutcome,
        errors: usize,
        detalles: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            resource,
            upserted: outcome.upserted,
            deleted: outcome.deleted,
            errors,
            detalles,
        }
    }
}

// =========================================================================
// Field extraction helpers for inline payloads
// =========================================================================

/// Numeric Shopify ID from a JSON `id` field that may be a GID string, a
/// bare numeric string, or an unsigned integer.
fn extract_id(item: &Value) -> Option<String> {
    match item.get("id")? {
        Value::String(s) => ShopifyGid::parse(s).ok().map(|g| g.numeric().to_string()),
        Value::Number(n) => n.as_u64().map(|id| id.to_string()),
        _ => None,
    }
}

fn string_field(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| item.get(*k))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Decimal from a string (`"49.99"`) or number field.
fn decimal_field(item: &Value, keys: &[&str]) -> Option<Decimal> {
    let value = keys.iter().find_map(|k| item.get(*k))?;
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(_) => Decimal::from_str(&value.to_string()).ok(),
        _ => None,
    }
}

fn int_field(item: &Value, keys: &[&str]) -> Option<i32> {
    keys.iter()
        .find_map(|k| item.get(*k))
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
}

fn bool_field(item: &Value, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|k| item.get(*k)).and_then(Value::as_bool)
}

fn datetime_field(item: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    string_field(item, keys).and_then(|s| s.parse().ok())
}

fn string_list_field(item: &Value, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .find_map(|k| item.get(*k))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Map inline items with `map`, collecting skipped-item messages.
fn map_items<T>(
    items: &[Value],
    resource: &str,
    map: impl Fn(&Value) -> Option<T>,
) -> (Vec<T>, usize, Vec<String>) {
    let mut mapped = Vec::with_capacity(items.len());
    let mut errors = 0;
    let mut detalles = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match map(item) {
            Some(upsert) => mapped.push(upsert),
            None => {
                errors += 1;
                if detalles.len() < MAX_DETAIL_MESSAGES {
                    detalles.push(format!(
                        "{resource}[{index}]: elemento descartado, faltan campos obligatorios"
                    ));
                }
            }
        }
    }

    (mapped, errors, detalles)
}

// =========================================================================
// Products
// =========================================================================

fn map_product(item: &Value) -> Option<ProductUpsert> {
    Some(ProductUpsert {
        shopify_id: extract_id(item)?,
        titulo: string_field(item, &["title", "titulo"])?,
        descripcion: string_field(item, &["description", "descripcion"]).unwrap_or_default(),
        precio_base: decimal_field(item, &["price", "precio_base"]).unwrap_or(Decimal::ZERO),
        sku: string_field(item, &["sku"]),
        inventario_disponible: int_field(
            item,
            &["inventory", "inventory_quantity", "inventario_disponible"],
        )
        .unwrap_or(0),
        estado: string_field(item, &["status", "estado"]).unwrap_or_else(|| "ACTIVE".to_string()),
        imagen_url: string_field(item, &["image", "image_url", "imagen_url"]),
        proveedor: string_field(item, &["vendor", "proveedor"]),
        tipo_producto: string_field(item, &["product_type", "tipo_producto"]),
        etiquetas: string_list_field(item, &["tags", "etiquetas"]),
        seo_titulo: string_field(item, &["seo_title", "seo_titulo"]),
        seo_descripcion: string_field(item, &["seo_description", "seo_descripcion"]),
    })
}

impl From<ShopifyProduct> for ProductUpsert {
    fn from(p: ShopifyProduct) -> Self {
        Self {
            shopify_id: p.id,
            titulo: p.titulo,
            descripcion: p.descripcion,
            precio_base: p.precio_base,
            sku: p.sku,
            inventario_disponible: p.inventario_disponible,
            estado: p.estado.as_str().to_string(),
            imagen_url: p.imagen_url,
            proveedor: p.proveedor,
            tipo_producto: p.tipo_producto,
            etiquetas: p.etiquetas,
            seo_titulo: p.seo_titulo,
            seo_descripcion: p.seo_descripcion,
        }
    }
}

/// Replace the `productos` mirror.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed payload, `AppError::Shopify`
/// when the fetch fails, and `AppError::Database` when the write fails.
pub async fn sync_products(
    pool: &PgPool,
    shopify: &ShopifyClient,
    input: SyncInput,
) -> Result<SyncReport, AppError> {
    let (upserts, errors, detalles) = match input {
        SyncInput::Inline(items) => map_items(&items, "products", map_product),
        SyncInput::FetchFromShopify => {
            let products = shopify.list_products(None).await?;
            (
                products.into_iter().map(ProductUpsert::from).collect(),
                0,
                Vec::new(),
            )
        }
    };

    let outcome = ProductRepository::new(pool).replace_all(&upserts).await?;
    info!(
        upserted = outcome.upserted,
        deleted = outcome.deleted,
        "productos sync completed"
    );
    Ok(SyncReport::new("productos", outcome, errors, detalles))
}

// =========================================================================
// Collections
// =========================================================================

fn map_collection(item: &Value) -> Option<CollectionUpsert> {
    Some(CollectionUpsert {
        shopify_id: extract_id(item)?,
        titulo: string_field(item, &["title", "titulo"])?,
        descripcion: string_field(item, &["description", "descripcion"]).unwrap_or_default(),
        imagen_url: string_field(item, &["image", "image_url", "imagen_url"]),
        handle: string_field(item, &["handle"]).unwrap_or_default(),
        productos_count: int_field(item, &["products_count", "productos_count"]).unwrap_or(0),
        publicada: bool_field(item, &["published", "publicada"]).unwrap_or(false),
    })
}

impl From<ShopifyCollection> for CollectionUpsert {
    fn from(c: ShopifyCollection) -> Self {
        Self {
            shopify_id: c.id,
            titulo: c.titulo,
            descripcion: c.descripcion,
            imagen_url: c.imagen_url,
            handle: c.handle,
            productos_count: c.productos_count,
            publicada: c.publicada,
        }
    }
}

/// Replace the `colecciones` mirror.
///
/// # Errors
///
/// Same failure modes as [`sync_products`].
pub async fn sync_collections(
    pool: &PgPool,
    shopify: &ShopifyClient,
    input: SyncInput,
) -> Result<SyncReport, AppError> {
    let (upserts, errors, detalles) = match input {
        SyncInput::Inline(items) => map_items(&items, "collections", map_collection),
        SyncInput::FetchFromShopify => {
            let collections = shopify.list_collections().await?;
            (
                collections.into_iter().map(CollectionUpsert::from).collect(),
                0,
                Vec::new(),
            )
        }
    };

    let outcome = CollectionRepository::new(pool).replace_all(&upserts).await?;
    info!(
        upserted = outcome.upserted,
        deleted = outcome.deleted,
        "colecciones sync completed"
    );
    Ok(SyncReport::new("colecciones", outcome, errors, detalles))
}

// =========================================================================
// Customers
// =========================================================================

fn map_customer(item: &Value) -> Option<CustomerUpsert> {
    let nombre = string_field(item, &["name", "display_name", "nombre"]).or_else(|| {
        let first = string_field(item, &["first_name"]);
        let last = string_field(item, &["last_name"]);
        match (first, last) {
            (Some(f), Some(l)) => Some(format!("{f} {l}")),
            (Some(f), None) => Some(f),
            (None, Some(l)) => Some(l),
            (None, None) => None,
        }
    })?;

    Some(CustomerUpsert {
        shopify_id: extract_id(item)?,
        email: string_field(item, &["email"]),
        nombre,
        telefono: string_field(item, &["phone", "telefono"]),
        estado: string_field(item, &["state", "estado"]).unwrap_or_default(),
        total_gastado: decimal_field(item, &["total_spent", "total_gastado"])
            .unwrap_or(Decimal::ZERO),
        pedidos_count: int_field(item, &["orders_count", "pedidos_count"]).unwrap_or(0),
        pais: string_field(item, &["country", "pais"]),
        provincia: string_field(item, &["province", "provincia"]),
    })
}

impl From<ShopifyCustomer> for CustomerUpsert {
    fn from(c: ShopifyCustomer) -> Self {
        Self {
            shopify_id: c.id,
            email: c.email,
            nombre: c.nombre,
            telefono: c.telefono,
            estado: c.estado,
            total_gastado: c.total_gastado,
            pedidos_count: c.pedidos_count,
            pais: c.pais,
            provincia: c.provincia,
        }
    }
}

/// Replace the `clientes` mirror.
///
/// # Errors
///
/// Same failure modes as [`sync_products`].
pub async fn sync_customers(
    pool: &PgPool,
    shopify: &ShopifyClient,
    input: SyncInput,
) -> Result<SyncReport, AppError> {
    let (upserts, errors, detalles) = match input {
        SyncInput::Inline(items) => map_items(&items, "customers", map_customer),
        SyncInput::FetchFromShopify => {
            let customers = shopify.list_customers().await?;
            (
                customers.into_iter().map(CustomerUpsert::from).collect(),
                0,
                Vec::new(),
            )
        }
    };

    let outcome = CustomerRepository::new(pool).replace_all(&upserts).await?;
    info!(
        upserted = outcome.upserted,
        deleted = outcome.deleted,
        "clientes sync completed"
    );
    Ok(SyncReport::new("clientes", outcome, errors, detalles))
}

// =========================================================================
// Orders
// =========================================================================

fn map_order(item: &Value) -> Option<OrderUpsert> {
    Some(OrderUpsert {
        shopify_id: extract_id(item)?,
        numero: string_field(item, &["name", "number", "numero"])?,
        cliente_nombre: string_field(item, &["customer_name", "cliente_nombre"])
            .unwrap_or_default(),
        cliente_email: string_field(item, &["customer_email", "cliente_email", "email"]),
        total: decimal_field(item, &["total_price", "total"]).unwrap_or(Decimal::ZERO),
        subtotal: decimal_field(item, &["subtotal_price", "subtotal"]).unwrap_or(Decimal::ZERO),
        impuestos: decimal_field(item, &["total_tax", "impuestos"]).unwrap_or(Decimal::ZERO),
        estado_financiero: string_field(item, &["financial_status", "estado_financiero"])
            .unwrap_or_else(|| "PENDING".to_string()),
        estado_envio: string_field(item, &["fulfillment_status", "estado_envio"])
            .unwrap_or_else(|| "UNFULFILLED".to_string()),
        moneda: string_field(item, &["currency", "moneda"]).unwrap_or_else(|| "EUR".to_string()),
        articulos_count: int_field(item, &["items_count", "articulos_count"]).unwrap_or(0),
        notas: string_field(item, &["note", "notas"]),
    })
}

impl From<ShopifyOrder> for OrderUpsert {
    fn from(o: ShopifyOrder) -> Self {
        Self {
            shopify_id: o.id,
            numero: o.numero,
            cliente_nombre: o.cliente_nombre,
            cliente_email: o.cliente_email,
            total: o.total,
            subtotal: o.subtotal,
            impuestos: o.impuestos,
            estado_financiero: o.estado_financiero,
            estado_envio: o.estado_envio,
            moneda: o.moneda,
            articulos_count: o.articulos_count,
            notas: o.notas,
        }
    }
}

/// Replace the `pedidos` mirror.
///
/// # Errors
///
/// Same failure modes as [`sync_products`].
pub async fn sync_orders(
    pool: &PgPool,
    shopify: &ShopifyClient,
    input: SyncInput,
) -> Result<SyncReport, AppError> {
    let (upserts, errors, detalles) = match input {
        SyncInput::Inline(items) => map_items(&items, "orders", map_order),
        SyncInput::FetchFromShopify => {
            let orders = shopify.list_orders().await?;
            (
                orders.into_iter().map(OrderUpsert::from).collect(),
                0,
                Vec::new(),
            )
        }
    };

    let outcome = OrderRepository::new(pool).replace_all(&upserts).await?;
    info!(
        upserted = outcome.upserted,
        deleted = outcome.deleted,
        "pedidos sync completed"
    );
    Ok(SyncReport::new("pedidos", outcome, errors, detalles))
}

// =========================================================================
// Promotions
// =========================================================================

fn map_promotion(item: &Value) -> Option<PromotionUpsert> {
    let tipo = string_field(item, &["type", "tipo"])
        .filter(|t| t == "percentage" || t == "fixed_amount")
        .unwrap_or_else(|| "percentage".to_string());

    Some(PromotionUpsert {
        shopify_id: extract_id(item)?,
        codigo: string_field(item, &["code", "codigo"]),
        titulo: string_field(item, &["title", "titulo"])?,
        tipo,
        valor: decimal_field(item, &["value", "valor"]).unwrap_or(Decimal::ZERO),
        comienza_en: datetime_field(item, &["starts_at", "comienza_en"])?,
        termina_en: datetime_field(item, &["ends_at", "termina_en"]),
        activa: bool_field(item, &["active", "activa"]).unwrap_or(true),
        limite_uso: int_field(item, &["usage_limit", "limite_uso"]),
    })
}

impl From<ShopifyPromotion> for PromotionUpsert {
    fn from(p: ShopifyPromotion) -> Self {
        Self {
            shopify_id: p.id,
            codigo: p.codigo,
            titulo: p.titulo,
            tipo: p.tipo,
            valor: p.valor,
            comienza_en: p.comienza_en,
            termina_en: p.termina_en,
            activa: p.activa,
            limite_uso: p.limite_uso,
        }
    }
}

/// Replace the `promociones` mirror.
///
/// # Errors
///
/// Same failure modes as [`sync_products`].
pub async fn sync_promotions(
    pool: &PgPool,
    shopify: &ShopifyClient,
    input: SyncInput,
) -> Result<SyncReport, AppError> {
    let (upserts, errors, detalles) = match input {
        SyncInput::Inline(items) => map_items(&items, "promotions", map_promotion),
        SyncInput::FetchFromShopify => {
            let promotions = shopify.list_promotions().await?;
            (
                promotions.into_iter().map(PromotionUpsert::from).collect(),
                0,
                Vec::new(),
            )
        }
    };

    let outcome = PromotionRepository::new(pool).replace_all(&upserts).await?;
    info!(
        upserted = outcome.upserted,
        deleted = outcome.deleted,
        "promociones sync completed"
    );
    Ok(SyncReport::new("promociones", outcome, errors, detalles))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_array_payload_is_rejected() {
        let body = json!({ "products": "not-an-array" });
        let err = SyncInput::from_body(&body, "products").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_missing_key_selects_fetch_mode() {
        let body = json!({});
        assert!(matches!(
            SyncInput::from_body(&body, "products").unwrap(),
            SyncInput::FetchFromShopify
        ));
    }

    #[test]
    fn test_inline_array_is_accepted() {
        let body = json!({ "products": [{ "id": 1, "title": "Deck" }] });
        match SyncInput::from_body(&body, "products").unwrap() {
            SyncInput::Inline(items) => assert_eq!(items.len(), 1),
            SyncInput::FetchFromShopify => panic!("expected inline items"),
        }
    }

    #[test]
    fn test_map_product_strips_gid_and_parses_money() {
        let item = json!({
            "id": "gid://shopify/Product/123",
            "title": "Deck",
            "price": "49.99",
            "inventory": 10
        });

        let upsert = map_product(&item).unwrap();
        assert_eq!(upsert.shopify_id, "123");
        assert_eq!(upsert.titulo, "Deck");
        assert_eq!(upsert.precio_base, Decimal::new(4999, 2));
        assert_eq!(upsert.inventario_disponible, 10);
    }

    #[test]
    fn test_map_product_accepts_numeric_id_and_price() {
        let item = json!({ "id": 456, "title": "Ruedas", "price": 19.5 });
        let upsert = map_product(&item).unwrap();
        assert_eq!(upsert.shopify_id, "456");
        assert_eq!(upsert.precio_base, Decimal::new(195, 1));
    }

    #[test]
    fn test_map_product_rejects_non_integer_id() {
        let item = json!({ "id": 1.5, "title": "Deck", "price": "49.99" });
        assert!(map_product(&item).is_none());

        let item = json!({ "id": -3, "title": "Deck", "price": "49.99" });
        assert!(map_product(&item).is_none());
    }

    #[test]
    fn test_items_without_required_fields_are_reported() {
        let items = vec![
            json!({ "id": 1, "title": "Deck" }),
            json!({ "title": "sin id" }),
            json!({ "id": 3 }),
        ];

        let (mapped, errors, detalles) = map_items(&items, "products", map_product);
        assert_eq!(mapped.len(), 1);
        assert_eq!(errors, 2);
        assert_eq!(detalles.len(), 2);
        assert!(detalles[0].contains("products[1]"));
    }

    #[test]
    fn test_map_promotion_requires_start_date() {
        let item = json!({ "id": 7, "title": "Rebajas" });
        assert!(map_promotion(&item).is_none());

        let item = json!({
            "id": 7,
            "title": "Rebajas",
            "code": "SKATE10",
            "type": "percentage",
            "value": "10",
            "starts_at": "2026-06-01T00:00:00Z"
        });
        let upsert = map_promotion(&item).unwrap();
        assert_eq!(upsert.codigo.as_deref(), Some("SKATE10"));
        assert!(upsert.activa);
    }
}
