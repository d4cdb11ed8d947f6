//! Flatten raw GraphQL nodes into the `Shopify*` resource types.
//!
//! Every conversion strips the GID down to its numeric tail and parses
//! money strings into `Decimal`, so nothing downstream touches wire
//! representations.

use rust_decimal::Decimal;

use granito_core::{Price, ShopifyGid};

use super::types::{
    BasicDiscountNode, CollectionNode, CustomerNode, DiscountNode, DiscountNodeWrapper,
    DiscountValueNode, OrderNode, ProductNode, ShopifyCollection, ShopifyCustomer, ShopifyOrder,
    ShopifyProduct, ShopifyPromotion,
};

/// Numeric tail of a GID, or the raw string when it is not a GID.
fn numeric_id(raw: &str) -> String {
    ShopifyGid::parse(raw).map_or_else(|_| raw.to_string(), |gid| gid.numeric().to_string())
}

fn parse_money(raw: &str) -> Decimal {
    Price::parse(raw).map_or(Decimal::ZERO, |p| p.amount())
}

pub(super) fn convert_product(node: ProductNode) -> ShopifyProduct {
    let variant = node.variants.edges.into_iter().next().map(|e| e.node);
    let seo = node.seo.unwrap_or_default();

    ShopifyProduct {
        id: numeric_id(&node.id),
        titulo: node.title,
        descripcion: node.description,
        precio_base: variant
            .as_ref()
            .map_or(Decimal::ZERO, |v| parse_money(&v.price)),
        sku: variant.and_then(|v| v.sku),
        inventario_disponible: node
            .total_inventory
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(0),
        // Unknown upstream values fall back to DRAFT rather than failing
        // the whole listing.
        estado: node.status.parse().unwrap_or_default(),
        imagen_url: node.featured_image.map(|i| i.url),
        proveedor: node.vendor,
        tipo_producto: node.product_type,
        etiquetas: node.tags,
        seo_titulo: seo.title,
        seo_descripcion: seo.description,
    }
}

pub(super) fn convert_collection(node: CollectionNode) -> ShopifyCollection {
    ShopifyCollection {
        id: numeric_id(&node.id),
        titulo: node.title,
        descripcion: node.description,
        handle: node.handle,
        imagen_url: node.image.map(|i| i.url),
        productos_count: node
            .products_count
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(0),
        publicada: node.published_on_current_publication,
    }
}

pub(super) fn convert_customer(node: CustomerNode) -> ShopifyCustomer {
    let (pais, provincia) = node
        .default_address
        .map_or((None, None), |a| (a.country, a.province));

    ShopifyCustomer {
        id: numeric_id(&node.id),
        email: node.email,
        nombre: node.display_name,
        telefono: node.phone,
        estado: node.state,
        total_gastado: node
            .amount_spent
            .map_or(Decimal::ZERO, |m| parse_money(&m.amount)),
        pedidos_count: node
            .number_of_orders
            .and_then(|n| n.parse().ok())
            .unwrap_or(0),
        pais,
        provincia,
    }
}

pub(super) fn convert_order(node: OrderNode) -> ShopifyOrder {
    let (cliente_nombre, cliente_email) = node
        .customer
        .map_or_else(|| (String::new(), None), |c| (c.display_name, c.email));

    ShopifyOrder {
        id: numeric_id(&node.id),
        numero: node.name,
        cliente_nombre,
        cliente_email,
        total: node
            .total_price_set
            .map_or(Decimal::ZERO, |m| parse_money(&m.shop_money.amount)),
        subtotal: node
            .subtotal_price_set
            .map_or(Decimal::ZERO, |m| parse_money(&m.shop_money.amount)),
        impuestos: node
            .total_tax_set
            .map_or(Decimal::ZERO, |m| parse_money(&m.shop_money.amount)),
        estado_financiero: node
            .display_financial_status
            .unwrap_or_else(|| "PENDING".to_string()),
        estado_envio: node
            .display_fulfillment_status
            .unwrap_or_else(|| "UNFULFILLED".to_string()),
        moneda: node.currency_code.unwrap_or_else(|| "EUR".to_string()),
        articulos_count: node
            .subtotal_line_items_quantity
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(0),
        notas: node.note,
    }
}

/// Flatten a discount node into a promotion. Discount classes the dashboard
/// does not manage (BXGY, free shipping) yield `None` and are skipped.
pub(super) fn convert_discount(wrapper: DiscountNodeWrapper) -> Option<ShopifyPromotion> {
    let id = numeric_id(&wrapper.id);
    match wrapper.discount {
        DiscountNode::DiscountCodeBasic(basic) => Some(convert_basic(id, basic, true)),
        DiscountNode::DiscountAutomaticBasic(basic) => Some(convert_basic(id, basic, false)),
        DiscountNode::Other => None,
    }
}

fn convert_basic(id: String, basic: BasicDiscountNode, has_code: bool) -> ShopifyPromotion {
    let codigo = if has_code {
        basic
            .codes
            .and_then(|c| c.edges.into_iter().next())
            .map(|e| e.node.code)
    } else {
        None
    };

    let (tipo, valor) = match basic.customer_gets.map(|g| g.value) {
        Some(DiscountValueNode::DiscountPercentage { percentage }) => (
            "percentage".to_string(),
            // Shopify reports a fraction; the dashboard stores percent points.
            Decimal::try_from(percentage * 100.0).unwrap_or(Decimal::ZERO),
        ),
        Some(DiscountValueNode::DiscountAmount { amount }) => {
            ("fixed_amount".to_string(), parse_money(&amount.amount))
        }
        Some(DiscountValueNode::Other) | None => ("percentage".to_string(), Decimal::ZERO),
    };

    let activa = basic.status.as_deref() != Some("EXPIRED")
        && basic.status.as_deref() != Some("SCHEDULED_TO_EXPIRE");

    ShopifyPromotion {
        id,
        codigo,
        titulo: basic.title,
        tipo,
        valor,
        comienza_en: basic.starts_at,
        termina_en: basic.ends_at,
        activa,
        limite_uso: basic.usage_limit.and_then(|n| i32::try_from(n).ok()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::shopify::types::{Connection, PageInfo, VariantNode};

    fn product_node() -> ProductNode {
        serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/123",
            "title": "Deck",
            "description": "Tabla de arce",
            "status": "ACTIVE",
            "vendor": "GranitoSkate",
            "productType": "deck",
            "tags": [],
            "totalInventory": 10,
            "featuredImage": null,
            "seo": null,
            "variants": {
                "edges": [{ "node": { "price": "49.99", "sku": "DECK-1" } }],
                "pageInfo": { "hasNextPage": false, "endCursor": null }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_convert_product_strips_gid_and_parses_price() {
        let product = convert_product(product_node());
        assert_eq!(product.id, "123");
        assert_eq!(product.titulo, "Deck");
        assert_eq!(product.precio_base, Decimal::new(4999, 2));
        assert_eq!(product.inventario_disponible, 10);
        assert_eq!(product.sku.as_deref(), Some("DECK-1"));
        assert_eq!(product.estado, granito_core::ProductStatus::Active);
    }

    #[test]
    fn test_convert_product_unknown_status_falls_back_to_draft() {
        let mut node = product_node();
        node.status = "SOMETHING_NEW".to_string();
        let product = convert_product(node);
        assert_eq!(product.estado, granito_core::ProductStatus::Draft);
    }

    #[test]
    fn test_convert_product_without_variants_defaults_price() {
        let mut node = product_node();
        node.variants = Connection::<VariantNode> {
            edges: vec![],
            page_info: PageInfo {
                has_next_page: false,
                end_cursor: None,
            },
        };
        let product = convert_product(node);
        assert_eq!(product.precio_base, Decimal::ZERO);
        assert_eq!(product.sku, None);
    }

    #[test]
    fn test_convert_collection_carries_publication_state() {
        let node: CollectionNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Collection/9",
            "title": "Decks",
            "publishedOnCurrentPublication": true
        }))
        .unwrap();
        assert!(convert_collection(node).publicada);

        let hidden: CollectionNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Collection/10",
            "title": "Archivo"
        }))
        .unwrap();
        assert!(!convert_collection(hidden).publicada);
    }

    #[test]
    fn test_percentage_fraction_becomes_percent_points() {
        let wrapper: DiscountNodeWrapper = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/DiscountCodeNode/7",
            "discount": {
                "__typename": "DiscountCodeBasic",
                "title": "Verano",
                "status": "ACTIVE",
                "startsAt": "2026-06-01T00:00:00Z",
                "endsAt": null,
                "usageLimit": null,
                "codes": {
                    "edges": [{ "node": { "code": "VERANO10" } }],
                    "pageInfo": { "hasNextPage": false, "endCursor": null }
                },
                "customerGets": {
                    "value": { "__typename": "DiscountPercentage", "percentage": 0.10 }
                }
            }
        }))
        .unwrap();

        let promo = convert_discount(wrapper).unwrap();
        assert_eq!(promo.id, "7");
        assert_eq!(promo.tipo, "percentage");
        assert_eq!(promo.valor.round_dp(2), Decimal::new(10, 0).round_dp(2));
        assert_eq!(promo.codigo.as_deref(), Some("VERANO10"));
        assert!(promo.activa);
    }

    #[test]
    fn test_unmanaged_discount_class_is_skipped() {
        let wrapper: DiscountNodeWrapper = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/DiscountNode/8",
            "discount": { "__typename": "DiscountCodeFreeShipping" }
        }))
        .unwrap();

        assert!(convert_discount(wrapper).is_none());
    }
}
