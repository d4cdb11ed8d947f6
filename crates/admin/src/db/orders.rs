//! Order mirror repository (`pedidos`).

use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{ReplaceOutcome, RepositoryError};
use crate::models::OrderRecord;

#[derive(Debug, Clone)]
pub struct OrderUpsert {
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
}

pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRecord>(
            "SELECT * FROM pedidos ORDER BY actualizado_en DESC, shopify_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, shopify_id: &str) -> Result<Option<OrderRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRecord>("SELECT * FROM pedidos WHERE shopify_id = $1")
            .bind(shopify_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Transactional upsert-then-prune replacement of the whole table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back.
    pub async fn replace_all(
        &self,
        items: &[OrderUpsert],
    ) -> Result<ReplaceOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut keep: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            sqlx::query(
                "INSERT INTO pedidos (shopify_id, numero, cliente_nombre, cliente_email, \
                     total, subtotal, impuestos, estado_financiero, estado_envio, moneda, \
                     articulos_count, notas, actualizado_en) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, now()) \
                 ON CONFLICT (shopify_id) DO UPDATE SET \
                     numero = EXCLUDED.numero, \
                     cliente_nombre = EXCLUDED.cliente_nombre, \
                     cliente_email = EXCLUDED.cliente_email, \
                     total = EXCLUDED.total, \
                     subtotal = EXCLUDED.subtotal, \
                     impuestos = EXCLUDED.impuestos, \
                     estado_financiero = EXCLUDED.estado_financiero, \
                     estado_envio = EXCLUDED.estado_envio, \
                     moneda = EXCLUDED.moneda, \
                     articulos_count = EXCLUDED.articulos_count, \
                     notas = EXCLUDED.notas, \
                     actualizado_en = now()",
            )
            .bind(&item.shopify_id)
            .bind(&item.numero)
            .bind(&item.cliente_nombre)
            .bind(&item.cliente_email)
            .bind(item.total)
            .bind(item.subtotal)
            .bind(item.impuestos)
            .bind(&item.estado_financiero)
            .bind(&item.estado_envio)
            .bind(&item.moneda)
            .bind(item.articulos_count)
            .bind(&item.notas)
            .execute(&mut *tx)
            .await?;
            keep.push(item.shopify_id.clone());
        }

        let deleted = sqlx::query("DELETE FROM pedidos WHERE NOT (shopify_id = ANY($1))")
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
