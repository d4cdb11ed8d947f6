//! Wire shapes for the GraphQL Admin API and the flattened resource types
//! the rest of the service consumes.
//!
//! Raw `*Node` structs mirror the GraphQL selection sets field for field.
//! The `Shopify*` structs are what leaves this module: GIDs reduced to
//! their numeric tail, money parsed, connections flattened.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use granito_core::ProductStatus;

// =========================================================================
// Generic connection plumbing
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageNode {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct MoneyNode {
    /// Decimal amount as a string, e.g. `"49.99"`.
    pub amount: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBagNode {
    pub shop_money: MoneyNode,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeoNode {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

// =========================================================================
// Products
// =========================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub total_inventory: Option<i64>,
    #[serde(default)]
    pub featured_image: Option<ImageNode>,
    #[serde(default)]
    pub seo: Option<SeoNode>,
    pub variants: Connection<VariantNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub price: String,
    #[serde(default)]
    pub sku: Option<String>,
}

/// A product as the service sees it: flat, numeric ID, parsed price.
#[derive(Debug, Clone, Serialize)]
pub struct ShopifyProduct {
    pub id: String,
    pub titulo: String,
    pub descripcion: String,
    pub precio_base: Decimal,
    pub sku: Option<String>,
    pub inventario_disponible: i32,
    pub estado: ProductStatus,
    pub imagen_url: Option<String>,
    pub proveedor: Option<String>,
    pub tipo_producto: Option<String>,
    pub etiquetas: Vec<String>,
    pub seo_titulo: Option<String>,
    pub seo_descripcion: Option<String>,
}

// =========================================================================
// Collections
// =========================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub image: Option<ImageNode>,
    #[serde(default)]
    pub products_count: Option<i64>,
    #[serde(default)]
    pub published_on_current_publication: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopifyCollection {
    pub id: String,
    pub titulo: String,
    pub descripcion: String,
    pub handle: String,
    pub imagen_url: Option<String>,
    pub productos_count: i32,
    pub publicada: bool,
}

// =========================================================================
// Customers
// =========================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerNode {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub amount_spent: Option<MoneyNode>,
    /// UnsignedInt64, serialized by Shopify as a string.
    #[serde(default)]
    pub number_of_orders: Option<String>,
    #[serde(default)]
    pub default_address: Option<AddressNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressNode {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopifyCustomer {
    pub id: String,
    pub email: Option<String>,
    pub nombre: String,
    pub telefono: Option<String>,
    pub estado: String,
    pub total_gastado: Decimal,
    pub pedidos_count: i32,
    pub pais: Option<String>,
    pub provincia: Option<String>,
}

// =========================================================================
// Orders
// =========================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub customer: Option<OrderCustomerNode>,
    #[serde(default)]
    pub total_price_set: Option<MoneyBagNode>,
    #[serde(default)]
    pub subtotal_price_set: Option<MoneyBagNode>,
    #[serde(default)]
    pub total_tax_set: Option<MoneyBagNode>,
    #[serde(default)]
    pub display_financial_status: Option<String>,
    #[serde(default)]
    pub display_fulfillment_status: Option<String>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub subtotal_line_items_quantity: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomerNode {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopifyOrder {
    pub id: String,
    pub numero: String,
    pub cliente_nombre: String,
    pub cliente_email: Option<String>,
    pub total: Decimal,
    pub subtotal: Decimal,
    pub impuestos: Decimal,
    pub estado_financiero: String,
    pub estado_envio: String,
    pub moneda: String,
    pub articulos_count: i32,
    pub notas: Option<String>,
}

// =========================================================================
// Discounts
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct DiscountNodeWrapper {
    pub id: String,
    pub discount: DiscountNode,
}

/// The two discount shapes the dashboard manages, plus a catch-all for
/// discount classes it ignores.
#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum DiscountNode {
    DiscountCodeBasic(BasicDiscountNode),
    DiscountAutomaticBasic(BasicDiscountNode),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDiscountNode {
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_limit: Option<i64>,
    #[serde(default)]
    pub codes: Option<Connection<CodeNode>>,
    #[serde(default)]
    pub customer_gets: Option<CustomerGetsNode>,
}

#[derive(Debug, Deserialize)]
pub struct CodeNode {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerGetsNode {
    pub value: DiscountValueNode,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum DiscountValueNode {
    DiscountPercentage {
        /// Fraction in `0.0..=1.0`.
        percentage: f64,
    },
    DiscountAmount {
        amount: MoneyNode,
    },
    #[serde(other)]
    Other,
}

/// A discount flattened into the promotion shape the dashboard uses.
#[derive(Debug, Clone, Serialize)]
pub struct ShopifyPromotion {
    pub id: String,
    pub codigo: Option<String>,
    pub titulo: String,
    /// `percentage` or `fixed_amount`.
    pub tipo: String,
    pub valor: Decimal,
    pub comienza_en: DateTime<Utc>,
    pub termina_en: Option<DateTime<Utc>>,
    pub activa: bool,
    pub limite_uso: Option<i32>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_node_tagged_by_typename() {
        let raw = serde_json::json!({
            "id": "gid://shopify/DiscountCodeNode/7",
            "discount": {
                "__typename": "DiscountCodeBasic",
                "title": "Verano",
                "status": "ACTIVE",
                "startsAt": "2026-06-01T00:00:00Z",
                "endsAt": null,
                "usageLimit": 100,
                "codes": {
                    "edges": [{ "node": { "code": "VERANO10" } }],
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                },
                "customerGets": {
                    "value": { "__typename": "DiscountPercentage", "percentage": 0.10 }
                }
            }
        });

        let wrapper: DiscountNodeWrapper = serde_json::from_value(raw).unwrap();
        match wrapper.discount {
            DiscountNode::DiscountCodeBasic(basic) => {
                assert_eq!(basic.title, "Verano");
                assert_eq!(basic.usage_limit, Some(100));
            }
            _ => panic!("expected DiscountCodeBasic"),
        }
    }

    #[test]
    fn test_unknown_discount_class_is_tolerated() {
        let raw = serde_json::json!({
            "id": "gid://shopify/DiscountNode/8",
            "discount": { "__typename": "DiscountCodeBxgy" }
        });

        let wrapper: DiscountNodeWrapper = serde_json::from_value(raw).unwrap();
        assert!(matches!(wrapper.discount, DiscountNode::Other));
    }

    #[test]
    fn test_product_node_deserializes_camel_case() {
        let raw = serde_json::json!({
            "id": "gid://shopify/Product/123",
            "title": "Deck",
            "description": "",
            "status": "ACTIVE",
            "vendor": "GranitoSkate",
            "productType": "deck",
            "tags": ["skate"],
            "totalInventory": 10,
            "featuredImage": { "url": "https://example.com/deck.png" },
            "seo": { "title": null, "description": null },
            "variants": {
                "edges": [{ "node": { "price": "49.99", "sku": "DECK-1" } }],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            }
        });

        let node: ProductNode = serde_json::from_value(raw).unwrap();
        assert_eq!(node.total_inventory, Some(10));
        assert_eq!(node.variants.edges[0].node.price, "49.99");
    }
}
