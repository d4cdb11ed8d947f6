//! Row types for the local Shopify mirror tables.
//!
//! These are disposable copies of Shopify data, refreshed wholesale by the
//! replace syncs. Field names follow the Spanish column names of the tables
//! so rows serialize directly into the JSON the dashboard expects.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use granito_core::PromotionStatus;

/// A row of `productos`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductRecord {
    pub shopify_id: String,
    pub titulo: String,
    pub descripcion: String,
    pub precio_base: Decimal,
    pub sku: Option<String>,
    pub inventario_disponible: i32,
    pub estado: String,
    pub imagen_url: Option<String>,
    pub proveedor: Option<String>,
    pub tipo_producto: Option<String>,
    pub etiquetas: Vec<String>,
    pub seo_titulo: Option<String>,
    pub seo_descripcion: Option<String>,
    pub actualizado_en: DateTime<Utc>,
}

/// A row of `colecciones`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CollectionRecord {
    pub shopify_id: String,
    pub titulo: String,
    pub descripcion: String,
    pub imagen_url: Option<String>,
    pub handle: String,
    pub productos_count: i32,
    pub publicada: bool,
    pub actualizado_en: DateTime<Utc>,
}

/// A row of `clientes`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CustomerRecord {
    pub shopify_id: String,
    pub email: Option<String>,
    pub nombre: String,
    pub telefono: Option<String>,
    pub estado: String,
    pub total_gastado: Decimal,
    pub pedidos_count: i32,
    pub pais: Option<String>,
    pub provincia: Option<String>,
    pub actualizado_en: DateTime<Utc>,
}

/// A row of `pedidos`.
///
/// The customer fields are a denormalized snapshot, not a reference into
/// `clientes` - the two tables sync independently.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderRecord {
    pub shopify_id: String,
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
    pub actualizado_en: DateTime<Utc>,
}

/// A row of `promociones`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PromotionRecord {
    pub shopify_id: String,
    pub codigo: Option<String>,
    pub titulo: String,
    /// `percentage` or `fixed_amount`.
    pub tipo: String,
    pub valor: Decimal,
    pub comienza_en: DateTime<Utc>,
    pub termina_en: Option<DateTime<Utc>>,
    pub activa: bool,
    pub limite_uso: Option<i32>,
    pub actualizado_en: DateTime<Utc>,
}

impl PromotionRecord {
    /// Derived state at instant `now`; not stored.
    #[must_use]
    pub fn estado(&self, now: DateTime<Utc>) -> PromotionStatus {
        PromotionStatus::compute(self.activa, self.comienza_en, self.termina_en, now)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_promotion_estado_is_computed_not_stored() {
        let promo = PromotionRecord {
            shopify_id: "99".into(),
            codigo: Some("VERANO10".into()),
            titulo: "Rebajas de verano".into(),
            tipo: "percentage".into(),
            valor: Decimal::new(10, 0),
            comienza_en: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
            termina_en: Some(Utc.with_ymd_and_hms(2026, 8, 31, 23, 59, 59).unwrap()),
            activa: true,
            limite_uso: None,
            actualizado_en: Utc::now(),
        };

        let during = Utc.with_ymd_and_hms(2026, 7, 15, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(promo.estado(during), PromotionStatus::Active);
        assert_eq!(promo.estado(after), PromotionStatus::Expired);
    }
}
