//! Collection mirror repository (`colecciones`).

use sqlx::PgPool;

use super::{ReplaceOutcome, RepositoryError};
use crate::models::CollectionRecord;

#[derive(Debug, Clone)]
pub struct CollectionUpsert {
    pub shopify_id: String,
    pub titulo: String,
    pub descripcion: String,
    pub imagen_url: Option<String>,
    pub handle: String,
    pub productos_count: i32,
    pub publicada: bool,
}

pub struct CollectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CollectionRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<CollectionRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, CollectionRecord>(
            "SELECT * FROM colecciones ORDER BY actualizado_en DESC, shopify_id",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, shopify_id: &str) -> Result<Option<CollectionRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, CollectionRecord>(
            "SELECT * FROM colecciones WHERE shopify_id = $1",
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
        items: &[CollectionUpsert],
    ) -> Result<ReplaceOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut keep: Vec<String> = Vec::with_capacity(items.len());
        for item in items {
            sqlx::query(
                "INSERT INTO colecciones (shopify_id, titulo, descripcion, imagen_url, \
                     handle, productos_count, publicada, actualizado_en) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, now()) \
                 ON CONFLICT (shopify_id) DO UPDATE SET \
                     titulo = EXCLUDED.titulo, \
                     descripcion = EXCLUDED.descripcion, \
                     imagen_url = EXCLUDED.imagen_url, \
                     handle = EXCLUDED.handle, \
                     productos_count = EXCLUDED.productos_count, \
                     publicada = EXCLUDED.publicada, \
                     actualizado_en = now()",
            )
            .bind(&item.shopify_id)
            .bind(&item.titulo)
            .bind(&item.descripcion)
            .bind(&item.imagen_url)
            .bind(&item.handle)
            .bind(item.productos_count)
            .bind(item.publicada)
            .execute(&mut *tx)
            .await?;
            keep.push(item.shopify_id.clone());
        }

        let deleted = sqlx::query("DELETE FROM colecciones WHERE NOT (shopify_id = ANY($1))")
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
