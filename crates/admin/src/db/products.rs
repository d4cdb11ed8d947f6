//! Product mirror repository (`productos`).

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{ReplaceOutcome, RepositoryError};
use crate::models::ProductRecord;

/// Validated input for one product upsert.
#[derive(Debug, Clone)]
pub struct ProductUpsert {
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
}

/// Repository for the `productos` mirror table.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all mirrored products, most recently synced first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ProductRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRecord>(
            "SELECT * FROM productos ORDER BY actualizado_en DESC, shopify_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get one mirrored product by its numeric Shopify ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, shopify_id: &str) -> Result<Option<ProductRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRecord>(
            "SELECT * FROM productos WHERE shopify_id = $1",
        )
        .bind(shopify_id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// Replace the table contents with `items`, atomically.
    ///
    /// Upserts every item on `shopify_id`, then prunes rows absent from the
    /// new set, all inside one transaction. Concurrent readers never observe
    /// an empty table, and a failure leaves the previous contents intact.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back.
    pub async fn replace_all(
        &self,
        items: &[ProductUpsert],
    ) -> Result<ReplaceOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut keep: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            sqlx::query(
                "INSERT INTO productos (shopify_id, titulo, descripcion, precio_base, sku, \
                     inventario_disponible, estado, imagen_url, proveedor, tipo_producto, \
                     etiquetas, seo_titulo, seo_descripcion, actualizado_en) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, now()) \
                 ON CONFLICT (shopify_id) DO UPDATE SET \
                     titulo = EXCLUDED.titulo, \
                     descripcion = EXCLUDED.descripcion, \
                     precio_base = EXCLUDED.precio_base, \
                     sku = EXCLUDED.sku, \
                     inventario_disponible = EXCLUDED.inventario_disponible, \
                     estado = EXCLUDED.estado, \
                     imagen_url = EXCLUDED.imagen_url, \
                     proveedor = EXCLUDED.proveedor, \
                     tipo_producto = EXCLUDED.tipo_producto, \
                     etiquetas = EXCLUDED.etiquetas, \
                     seo_titulo = EXCLUDED.seo_titulo, \
                     seo_descripcion = EXCLUDED.seo_descripcion, \
                     actualizado_en = now()",
            )
            .bind(&item.shopify_id)
            .bind(&item.titulo)
            .bind(&item.descripcion)
            .bind(item.precio_base)
            .bind(&item.sku)
            .bind(item.inventario_disponible)
            .bind(&item.estado)
            .bind(&item.imagen_url)
            .bind(&item.proveedor)
            .bind(&item.tipo_producto)
            .bind(&item.etiquetas)
            .bind(&item.seo_titulo)
            .bind(&item.seo_descripcion)
            .execute(&mut *tx)
            .await?;
            keep.push(item.shopify_id.clone());
        }

        let deleted = sqlx::query("DELETE FROM productos WHERE NOT (shopify_id = ANY($1))")
            .bind(&keep)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(ReplaceOutcome {
            upserted: items.len(),
            deleted: usize::try_from(deleted).unwrap_or(usize::MAX),
        })
    }
}
