//! Promotion mirror repository (`promociones`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::{ReplaceOutcome, RepositoryError};
use crate::models::PromotionRecord;

#[derive(Debug, Clone)]
pub struct PromotionUpsert {
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
}

pub struct PromotionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PromotionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<PromotionRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, PromotionRecord>(
            "SELECT * FROM promociones ORDER BY comienza_en DESC, shopify_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, shopify_id: &str) -> Result<Option<PromotionRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, PromotionRecord>(
            "SELECT * FROM promociones WHERE shopify_id = $1",
        )
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
        items: &[PromotionUpsert],
    ) -> Result<ReplaceOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut keep: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            sqlx::query(
                "INSERT INTO promociones (shopify_id, codigo, titulo, tipo, valor, \
                     comienza_en, termina_en, activa, limite_uso, actualizado_en) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now()) \
                 ON CONFLICT (shopify_id) DO UPDATE SET \
                     codigo = EXCLUDED.codigo, \
                     titulo = EXCLUDED.titulo, \
                     tipo = EXCLUDED.tipo, \
                     valor = EXCLUDED.valor, \
                     comienza_en = EXCLUDED.comienza_en, \
                     termina_en = EXCLUDED.termina_en, \
                     activa = EXCLUDED.activa, \
                     limite_uso = EXCLUDED.limite_uso, \
                     actualizado_en = now()",
            )
            .bind(&item.shopify_id)
            .bind(&item.codigo)
            .bind(&item.titulo)
            .bind(&item.tipo)
            .bind(item.valor)
            .bind(item.comienza_en)
            .bind(item.termina_en)
            .bind(item.activa)
            .bind(item.limite_uso)
            .execute(&mut *tx)
            .await?;
            keep.push(item.shopify_id.clone());
        }

        let deleted = sqlx::query("DELETE FROM promociones WHERE NOT (shopify_id = ANY($1))")
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
